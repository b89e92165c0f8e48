pub mod dashboard;
pub mod executors;
pub mod health;
pub mod metrics;

// Common response types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::errors::TableError;
use common::models::RouteParams;
use serde::{Deserialize, Serialize};

/// Standard API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub trace_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<TableError> for ErrorResponse {
    fn from(err: TableError) -> Self {
        ErrorResponse::new("validation_error", err.to_string())
    }
}

/// Standard API success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Query string accepted by the executors page and JSON listing
#[derive(Debug, Default, Deserialize)]
pub struct ExecutorsQueryParams {
    pub sort: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

impl ExecutorsQueryParams {
    pub fn route(&self) -> RouteParams {
        RouteParams {
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ErrorResponse::new("validation_error", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::new("upstream_error", "down").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ErrorResponse::new("template_error", "oops").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorResponse::new("not_found", "gone").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_table_error_is_validation_error() {
        let response: ErrorResponse = TableError::UnknownColumn("color".to_string()).into();
        assert_eq!(response.error, "validation_error");
        assert!(!response.trace_id.is_empty());
    }
}
