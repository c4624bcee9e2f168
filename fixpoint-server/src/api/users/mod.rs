//! Users API Module
//!
//! 任何已认证身份可用：登录 upsert、读取自己的记录 (角色解析依赖此接口)、
//! 档案编辑。管理端的用户管理在 [`crate::api::admin`]。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::upsert))
        .route("/{email}", get(handler::get_by_email).patch(handler::update_profile))
}
