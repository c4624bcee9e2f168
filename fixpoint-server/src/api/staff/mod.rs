//! Staff API Module (员工子树)
//!
//! 整棵子树由员工角色门禁保护。

mod handler;

use axum::{Router, middleware, routing::get, routing::patch};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::Role;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/staff", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/issues", get(handler::assigned_issues))
        .route("/issues/{id}/status", patch(handler::update_status))
        .route("/stats", get(handler::stats))
        .layer(middleware::from_fn_with_state(
            state,
            require_role(&[Role::Staff]),
        ))
}
