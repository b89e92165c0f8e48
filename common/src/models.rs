// Executor summary models as returned by the backend executors endpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Executor lifecycle status
///
/// Values the dashboard does not know are kept verbatim in `Other` so a single
/// new status does not fail the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutorStatus {
    Running,
    Stopped,
    Lost,
    Other(String),
}

impl ExecutorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutorStatus::Running => "running",
            ExecutorStatus::Stopped => "stopped",
            ExecutorStatus::Lost => "lost",
            ExecutorStatus::Other(value) => value,
        }
    }
}

impl From<&str> for ExecutorStatus {
    fn from(value: &str) -> Self {
        match value {
            "running" => ExecutorStatus::Running,
            "stopped" => ExecutorStatus::Stopped,
            "lost" => ExecutorStatus::Lost,
            other => ExecutorStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ExecutorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExecutorStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExecutorStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ExecutorStatus::from(value.as_str()))
    }
}

/// Completed-vs-total job counters reported by an executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorStats {
    #[serde(rename = "n_completed", alias = "completedCount")]
    pub completed_count: i64,
    #[serde(rename = "n_jobs", alias = "totalCount")]
    pub total_count: i64,
}

impl ExecutorStats {
    /// Fraction of completed jobs, `None` when there is nothing to track
    pub fn completion_ratio(&self) -> Option<f64> {
        if self.total_count > 0 {
            Some(self.completed_count as f64 / self.total_count as f64)
        } else {
            None
        }
    }
}

/// One row of the executors table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    pub status: ExecutorStatus,
    #[serde(default, deserialize_with = "string_or_json")]
    pub resources: String,
    #[serde(default)]
    pub stats: Option<ExecutorStats>,
}

/// Route parameters supplied by the page-routing layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteParams {
    pub name: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for id, got {}",
            other
        ))),
    }
}

fn string_or_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
