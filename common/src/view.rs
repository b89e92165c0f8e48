// Executors view: fetch-once state and table rendering

use crate::client::ExecutorSource;
use crate::error_state::ErrorState;
use crate::models::{ExecutorSummary, RouteParams};
use crate::table::{ColumnHeader, PageRequest, PageSlice, SortSpec, TableRow};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// State owned by an executors view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub rows: Vec<ExecutorSummary>,
    pub loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: true,
        }
    }
}

/// What a call to [`ExecutorsView::mount`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Rows were fetched and stored
    Loaded(usize),
    /// The fetch failed and was reported to the error state
    Failed,
    /// The page was already in an error state, nothing was fetched
    Skipped,
    /// Cancelled before the fetch resolved; state is untouched
    Cancelled,
    /// The view had already been mounted
    AlreadyMounted,
}

/// Table ready for a template
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
    pub loading: bool,
    pub empty: bool,
    pub sort: String,
    pub page: PageSlice,
}

/// Executors table view
///
/// Fetches the executor list once on mount and renders it any number of
/// times afterwards.
#[derive(Debug, Default)]
pub struct ExecutorsView {
    route: RouteParams,
    state: ViewState,
    mounted: bool,
}

impl ExecutorsView {
    pub fn new(route: RouteParams) -> Self {
        Self {
            route,
            state: ViewState::default(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn route(&self) -> &RouteParams {
        &self.route
    }

    /// Fetch the executor list unless the page already reports an error
    ///
    /// Only the first call fetches. If `cancel` fires first the in-flight
    /// request is dropped and nothing is written to the view or `errors`.
    /// Dropping the returned future, as axum does for an aborted request,
    /// has the same effect.
    #[tracing::instrument(skip_all, fields(route_name = ?self.route.name))]
    pub async fn mount(
        &mut self,
        source: &dyn ExecutorSource,
        errors: &dyn ErrorState,
        cancel: &CancellationToken,
    ) -> MountOutcome {
        if self.mounted {
            return MountOutcome::AlreadyMounted;
        }
        self.mounted = true;

        if !errors.is_ok() {
            tracing::debug!("Error already reported, skipping executors fetch");
            self.state.loading = false;
            return MountOutcome::Skipped;
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Executors view torn down before fetch resolved");
                return MountOutcome::Cancelled;
            }
            result = source.fetch_executors() => result,
        };

        self.state.loading = false;
        match result {
            Ok(rows) => {
                let count = rows.len();
                self.state.rows = rows;
                tracing::info!(rows = count, "Executors loaded");
                MountOutcome::Loaded(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch executors");
                errors.set_fetch_error();
                MountOutcome::Failed
            }
        }
    }

    /// Sorted page of rows
    pub fn page(
        &self,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> (Vec<&ExecutorSummary>, PageSlice) {
        let mut ordered: Vec<&ExecutorSummary> = self.state.rows.iter().collect();
        ordered.sort_by(|a, b| sort.compare(a, b));
        let (rows, meta) = page.slice(&ordered);
        (rows.to_vec(), meta)
    }

    /// Render the table; never fetches
    pub fn render(&self, sort: &SortSpec, page: &PageRequest) -> TableView {
        let (rows, meta) = self.page(sort, page);
        TableView {
            columns: sort.headers(),
            rows: rows.into_iter().map(TableRow::from).collect(),
            loading: self.state.loading,
            empty: !self.state.loading && self.state.rows.is_empty(),
            sort: sort.to_string(),
            page: meta,
        }
    }
}
