//! # dxfpen-relay
//!
//! Receives a recorded plotter job over HTTP and answers with the DXF drawing.

pub use dxfpen;
use dxfpen::{DxfFormat, ExportFormat, ExportJob};

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Environment variable holding the address to listen on.
pub const ADDR_VAR: &str = "DXFPEN_RELAY_ADDR";

/// Address used when [`ADDR_VAR`] is not set.
pub const DEFAULT_ADDR: &str = "0.0.0.0:1789";

/// Media type of the returned drawings.
pub const DXF_MEDIA_TYPE: &str = "application/dxf";

/// A drawing to be exported.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The name the drawing will be saved under, must end in `.dxf`.
    pub file_name: String,
    /// The layout and the recorded moves.
    #[serde(flatten)]
    pub job: ExportJob,
}

/// Gets the address to listen on.
///
/// # Returns
/// The value of [`ADDR_VAR`], or [`DEFAULT_ADDR`] if it is unset.
pub fn listen_addr() -> String {
    std::env::var(ADDR_VAR).unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}

/// Builds the relay's routes.
///
/// # Returns
/// The router serving `/` and `/exports`.
pub fn router() -> Router {
    Router::new()
        .route("/", get("Nothing to draw here, POST your plot to /exports"))
        .route("/exports", post(export_drawing))
}

/// Handles requests to turn a recorded job into a DXF drawing.
///
/// # Returns
/// The drawing on success, `400` for a name that is not a DXF file and `500` if
/// the drawing could not be written.
pub async fn export_drawing(Json(request): Json<ExportRequest>) -> Response {
    let format = DxfFormat::new();
    if !format.can_handle(&request.file_name) {
        return (
            StatusCode::BAD_REQUEST,
            format!("{} is not a DXF file name", request.file_name),
        )
            .into_response();
    }

    let mut dxf = Vec::new();
    if !format.save(&mut dxf, &request.job.path, &request.job.layout) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error writing drawing".to_string(),
        )
            .into_response();
    }

    log::info!("Exported {} ({} bytes)", request.file_name, dxf.len());
    (StatusCode::OK, [(header::CONTENT_TYPE, DXF_MEDIA_TYPE)], dxf).into_response()
}
