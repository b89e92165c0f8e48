// Shared utilities for dashboard handlers

use axum::http::HeaderMap;
use tera::{Context, Tera};

use crate::handlers::ErrorResponse;

/// Pick the fragment for HTMX requests and the full page otherwise
pub fn select_template(
    headers: &HeaderMap,
    content_template: &'static str,
    full_template: &'static str,
) -> &'static str {
    if is_htmx_request(headers) {
        content_template
    } else {
        full_template
    }
}

pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Render `template_name`, mapping failures to an ErrorResponse
pub fn render_template(
    templates: &Tera,
    template_name: &str,
    context: &Context,
) -> Result<String, ErrorResponse> {
    templates.render(template_name, context).map_err(|e| {
        tracing::error!(error = %e, template = template_name, "Template rendering failed");
        ErrorResponse::new(
            "template_error",
            format!("Failed to render '{}'", template_name),
        )
    })
}
