//! Health API 模块

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::collections::HashMap;

use crate::core::ServerState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// 资源版本快照，客户端据此失效本地缓存组
    versions: HashMap<String, u64>,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        versions: state.resource_versions.snapshot(),
    })
}
