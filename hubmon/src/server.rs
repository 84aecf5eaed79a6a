//! HTTP surface of the exporter.
//!
//! Serves a static landing page at `/` and runs one scrape per request to
//! the configured telemetry path.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use libhubmon::Exporter;
use std::sync::Arc;

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Content type of the Prometheus text exposition format.
const TEXT_FORMAT: &str = "text/plain; version=0.0.4";

/// Shared application state.
struct AppState {
    exporter: Exporter,
    telemetry_path: String,
}

/// Builds the application router: landing page at `/`, metrics under the
/// configured telemetry path.
pub fn router(exporter: Exporter, telemetry_path: &str) -> Router {
    let telemetry_path = normalize_path(telemetry_path);
    let state = Arc::new(AppState {
        exporter,
        telemetry_path: telemetry_path.clone(),
    });

    Router::new()
        .route("/", get(index))
        .route(&telemetry_path, get(metrics))
        .with_state(state)
}

/// Splits a comma-separated target list, dropping empty entries.
pub fn split_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Ensures a route path starts with a slash.
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(landing_page(&state.telemetry_path))
}

/// Static landing page linking the metrics endpoint.
fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Docker Hub Exporter</title></head>\n\
         <body>\n\
         <h1>Docker Hub Prometheus Metrics Exporter</h1>\n\
         <p><a href='{}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        telemetry_path
    )
}

async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.exporter.scrape().await {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
