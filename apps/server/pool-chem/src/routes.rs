//! HTTP routes.
//!
//! - `/api/report`: every method lands on [`generate_report`], which lets the
//!   translator decide (non-POST gets a JSON 405, not axum's empty one)
//! - anything else: static files from the configured directory

use crate::error::ApiError;
use crate::state::AppState;

use report_core::error::ReportError;

use std::path::Path;

use axum::Json;
use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::routing::any;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use uuid::Uuid;

pub const REPORT_ROUTE: &str = "/api/report";

/// Largest report request body read into memory.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Success body: `{"report": "<markdown>"}`, on every success path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBody {
    pub report: String,
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(REPORT_ROUTE, any(generate_report))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

pub async fn generate_report(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ReportBody>, ApiError> {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    info!("[{request_id}] {method} {REPORT_ROUTE}");

    let translator = state.translator();
    let outcome = match translator.validate(&method) {
        // Body is only buffered once the method and credential checks pass
        Ok(credential) => match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
            Ok(body) => {
                debug!("[{request_id}] {} byte body", body.len());
                translator.generate_from_body(credential, &body).await
            }
            Err(e) => Err(ReportError::invalid_input(format!(
                "Request body could not be read (limit {MAX_BODY_BYTES} bytes): {e}"
            ))),
        },
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            info!(
                "[{request_id}] Report ready ({} chars{})",
                report.markdown().len(),
                if report.is_fallback() { ", fallback" } else { "" }
            );
            Ok(Json(ReportBody {
                report: report.into_markdown(),
            }))
        }
        Err(e) => {
            let error = ApiError::from(e);
            warn!(
                "[{request_id}] {method} {REPORT_ROUTE} -> {} [{}]: {}",
                error.status_code(),
                error.0.error_category(),
                error.0.client_message()
            );
            Err(error)
        }
    }
}
