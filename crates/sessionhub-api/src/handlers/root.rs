//! Service banner.

use axum::Json;

use crate::dto::response::RootResponse;

/// GET /
pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: "SessionHub session control API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
