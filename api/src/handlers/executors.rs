// Executors listing as JSON

use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use common::error_state::ErrorContainer;
use common::models::ExecutorSummary;
use common::table::{PageRequest, PageSlice, SortSpec};
use common::view::{ExecutorsView, MountOutcome};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{ErrorResponse, ExecutorsQueryParams, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExecutorsPage {
    pub rows: Vec<ExecutorSummary>,
    pub sort: String,
    #[serde(flatten)]
    pub page: PageSlice,
    pub fetched_at: DateTime<Utc>,
}

/// Sorted, paginated executor summaries
#[tracing::instrument(skip(state))]
pub async fn list_executors(
    State(state): State<AppState>,
    Query(params): Query<ExecutorsQueryParams>,
) -> Result<SuccessResponse<ExecutorsPage>, ErrorResponse> {
    let sort = SortSpec::parse(params.sort.as_deref().unwrap_or_default())?;
    let page = PageRequest::new(params.offset, params.limit, state.config.dashboard.page_size)?;

    let errors = ErrorContainer::new();
    let cancel = CancellationToken::new();
    let mut view = ExecutorsView::new(params.route());

    match view.mount(state.source.as_ref(), &errors, &cancel).await {
        MountOutcome::Loaded(_) => {}
        _ => {
            return Err(
                ErrorResponse::new("upstream_error", "Failed to fetch executors from backend")
                    .with_details(serde_json::json!({
                        "endpoint": state.config.backend.executors_url(),
                    })),
            );
        }
    }

    let (rows, meta) = view.page(&sort, &page);
    Ok(SuccessResponse::new(ExecutorsPage {
        rows: rows.into_iter().cloned().collect(),
        sort: sort.to_string(),
        page: meta,
        fetched_at: Utc::now(),
    }))
}
