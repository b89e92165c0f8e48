// Executors table page

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
};
use common::error_state::{ErrorContainer, ErrorState};
use common::table::{PageRequest, SortSpec};
use common::view::ExecutorsView;
use tera::Context;
use tokio_util::sync::CancellationToken;

use super::shared_utils::{render_template, select_template};
use crate::handlers::{ErrorResponse, ExecutorsQueryParams};
use crate::state::AppState;

const CONTENT_TEMPLATE: &str = "_executors_content.html";
const FULL_TEMPLATE: &str = "executors.html";
const FETCH_ERROR_TEMPLATE: &str = "_fetch_error.html";

/// Executors page (HTMX)
///
/// A plain request returns the page shell with the table in its loading
/// state; the shell then requests the table fragment, which is where the
/// executors are fetched.
#[tracing::instrument(skip(state, headers))]
pub async fn executors_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ExecutorsQueryParams>,
) -> Result<Html<String>, ErrorResponse> {
    let sort = SortSpec::parse(params.sort.as_deref().unwrap_or_default())?;
    let page = PageRequest::new(params.offset, params.limit, state.config.dashboard.page_size)?;

    let mut context = Context::new();
    context.insert("active_page", "executors");
    context.insert("route_name", &params.name);

    let mut view = ExecutorsView::new(params.route());
    let template = select_template(&headers, CONTENT_TEMPLATE, FULL_TEMPLATE);

    if template == FULL_TEMPLATE {
        context.insert("table", &view.render(&sort, &page));
        return Ok(Html(render_template(&state.templates, template, &context)?));
    }

    let errors = ErrorContainer::new();
    let cancel = CancellationToken::new();
    let outcome = view.mount(state.source.as_ref(), &errors, &cancel).await;
    tracing::debug!(outcome = ?outcome, "Executors view mounted");

    if !errors.is_ok() {
        context.insert("sort", &sort.to_string());
        context.insert("offset", &page.offset);
        context.insert("limit", &page.limit);
        return Ok(Html(render_template(
            &state.templates,
            FETCH_ERROR_TEMPLATE,
            &context,
        )?));
    }

    context.insert("table", &view.render(&sort, &page));
    Ok(Html(render_template(&state.templates, template, &context)?))
}
