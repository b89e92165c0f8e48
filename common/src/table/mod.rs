// Executors table: column definitions, sort rules and paging

mod cells;
mod pagination;

pub use cells::{stats_cell, status_cell, ProgressCell, StatusCell, TableRow};
pub use pagination::{calculate_pagination, PageRequest, PageSlice, MAX_PAGE_LIMIT};

use crate::errors::TableError;
use crate::models::{ExecutorStatus, ExecutorSummary};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort priority of known statuses, highest first
pub const STATUS_PRIORITY: [&str; 3] = ["running", "stopped", "lost"];

/// Columns of the executors table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Status,
    Id,
    Name,
    Hostname,
    Resources,
    Stats,
}

impl ColumnId {
    pub const ALL: [ColumnId; 6] = [
        ColumnId::Status,
        ColumnId::Id,
        ColumnId::Name,
        ColumnId::Hostname,
        ColumnId::Resources,
        ColumnId::Stats,
    ];

    pub fn accessor(&self) -> &'static str {
        match self {
            ColumnId::Status => "status",
            ColumnId::Id => "id",
            ColumnId::Name => "name",
            ColumnId::Hostname => "hostname",
            ColumnId::Resources => "resources",
            ColumnId::Stats => "stats",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            ColumnId::Status => "Status",
            ColumnId::Id => "Id",
            ColumnId::Name => "Name",
            ColumnId::Hostname => "Hostname",
            ColumnId::Resources => "Resources",
            ColumnId::Stats => "Jobs",
        }
    }

    /// Maximum rendered width in pixels
    pub fn max_width(&self) -> Option<u32> {
        match self {
            ColumnId::Status | ColumnId::Name | ColumnId::Hostname => Some(150),
            ColumnId::Id => Some(80),
            ColumnId::Resources | ColumnId::Stats => None,
        }
    }

    /// Order two rows by this column, ascending
    pub fn compare(&self, a: &ExecutorSummary, b: &ExecutorSummary) -> Ordering {
        match self {
            ColumnId::Status => compare_status(&a.status, &b.status),
            ColumnId::Id => compare_ids(&a.id, &b.id),
            ColumnId::Name => a.name.cmp(&b.name),
            ColumnId::Hostname => a.hostname.cmp(&b.hostname),
            ColumnId::Resources => a.resources.cmp(&b.resources),
            ColumnId::Stats => {
                let ratio = |row: &ExecutorSummary| row.stats.and_then(|s| s.completion_ratio());
                match (ratio(a), ratio(b)) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    (Some(_), None) => Ordering::Greater,
                    (None, Some(_)) => Ordering::Less,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

impl FromStr for ColumnId {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .into_iter()
            .find(|c| c.accessor() == s)
            .ok_or_else(|| TableError::UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.accessor())
    }
}

/// Header metadata handed to templates
#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub id: ColumnId,
    pub header: &'static str,
    pub max_width: Option<u32>,
    /// `Some("asc")`/`Some("desc")` when the table is sorted by this column
    pub sorted: Option<&'static str>,
    /// Sort parameter a header click switches to
    pub toggle: String,
}

/// Priority rank of a status: higher ranks sort later in ascending order
///
/// Statuses missing from `STATUS_PRIORITY` rank 0, below every listed one.
pub fn status_rank(status: &ExecutorStatus) -> usize {
    STATUS_PRIORITY
        .iter()
        .position(|known| *known == status.as_str())
        .map(|index| STATUS_PRIORITY.len() - index)
        .unwrap_or(0)
}

/// Ascending status comparator
///
/// A descending sort therefore lists `running, stopped, lost`, then any
/// unknown status. Unknown statuses are equal to each other.
pub fn compare_status(a: &ExecutorStatus, b: &ExecutorStatus) -> Ordering {
    status_rank(a).cmp(&status_rank(b))
}

/// Ascending id comparator: numeric when both ids are integers
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// One sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: ColumnId,
    pub desc: bool,
}

impl SortKey {
    pub fn asc(column: ColumnId) -> Self {
        Self {
            column,
            desc: false,
        }
    }

    pub fn desc(column: ColumnId) -> Self {
        Self { column, desc: true }
    }
}

/// Ordered list of sort criteria, earlier keys take precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl Default for SortSpec {
    /// Status descending, then id descending
    fn default() -> Self {
        Self {
            keys: vec![SortKey::desc(ColumnId::Status), SortKey::desc(ColumnId::Id)],
        }
    }
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Parse `col[:asc|:desc],...`; an empty string yields the default sort
    pub fn parse(input: &str) -> Result<Self, TableError> {
        let mut keys: Vec<SortKey> = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (column, direction) = match part.split_once(':') {
                Some((column, direction)) => (column.trim(), Some(direction.trim())),
                None => (part, None),
            };
            let column: ColumnId = column.parse()?;
            let desc = match direction {
                None | Some("asc") => false,
                Some("desc") => true,
                Some(other) => {
                    return Err(TableError::InvalidDirection {
                        column: column.to_string(),
                        direction: other.to_string(),
                    })
                }
            };
            // First mention of a column wins
            if !keys.iter().any(|k| k.column == column) {
                keys.push(SortKey { column, desc });
            }
        }

        if keys.is_empty() {
            Ok(Self::default())
        } else {
            Ok(Self { keys })
        }
    }

    pub fn compare(&self, a: &ExecutorSummary, b: &ExecutorSummary) -> Ordering {
        for key in &self.keys {
            let ordering = key.column.compare(a, b);
            let ordering = if key.desc {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sort of `rows` by these keys
    pub fn sort(&self, rows: &mut [ExecutorSummary]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }

    /// Column headers annotated with the current sort direction
    pub fn headers(&self) -> Vec<ColumnHeader> {
        ColumnId::ALL
            .into_iter()
            .map(|id| {
                let sorted = self
                    .keys
                    .iter()
                    .find(|k| k.column == id)
                    .map(|k| if k.desc { "desc" } else { "asc" });
                let toggle = match sorted {
                    Some("asc") => format!("{}:desc", id),
                    _ => format!("{}:asc", id),
                };
                ColumnHeader {
                    id,
                    header: id.header(),
                    max_width: id.max_width(),
                    sorted,
                    toggle,
                }
            })
            .collect()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .keys
            .iter()
            .map(|k| format!("{}:{}", k.column, if k.desc { "desc" } else { "asc" }))
            .collect();
        f.write_str(&parts.join(","))
    }
}
