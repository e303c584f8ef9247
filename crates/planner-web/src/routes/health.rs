//! Liveness check.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Always `{"status":"ok"}` while the process serves requests.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
