// Cell renderers for the executors table

use crate::models::{ExecutorStats, ExecutorStatus, ExecutorSummary};
use serde::Serialize;

/// Status text tagged with a style class derived from its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCell {
    pub label: String,
    pub class: String,
}

/// Bounded progress indicator for job counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressCell {
    pub value: i64,
    pub max: i64,
    pub percent: u32,
    pub label: String,
}

/// A fully rendered table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub resources: String,
    pub status: StatusCell,
    pub stats: Option<ProgressCell>,
}

pub fn status_cell(status: &ExecutorStatus) -> StatusCell {
    let label = status.as_str().to_string();
    // Class names only carry [A-Za-z0-9_-]
    let suffix: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    StatusCell {
        class: format!("executor-status-{}", suffix),
        label,
    }
}

/// Progress for `stats`, or `None` when there are no jobs to show
pub fn stats_cell(stats: Option<&ExecutorStats>) -> Option<ProgressCell> {
    let stats = stats?;
    if stats.total_count <= 0 {
        return None;
    }

    let value = stats.completed_count.clamp(0, stats.total_count);
    let percent = (i128::from(value) * 100 / i128::from(stats.total_count)) as u32;
    Some(ProgressCell {
        value,
        max: stats.total_count,
        percent,
        label: format!("{}/{}", stats.completed_count, stats.total_count),
    })
}

impl From<&ExecutorSummary> for TableRow {
    fn from(summary: &ExecutorSummary) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            hostname: summary.hostname.clone(),
            resources: summary.resources.clone(),
            status: status_cell(&summary.status),
            stats: stats_cell(summary.stats.as_ref()),
        }
    }
}
