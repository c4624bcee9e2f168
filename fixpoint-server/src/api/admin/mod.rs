//! Admin API Module (管理员子树)
//!
//! 整棵子树由管理员角色门禁保护。

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::Role;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/admin", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        // Issues
        .route("/issues", get(handler::issues))
        .route("/issues/{id}/assign", post(handler::assign))
        .route("/issues/{id}/reject", post(handler::reject))
        .route("/issues/{id}", delete(handler::delete_issue))
        .route("/issues/{id}/status", axum::routing::patch(handler::update_status))
        // Users
        .route("/users", get(handler::users))
        .route("/users/{email}/block", axum::routing::patch(handler::block))
        // Staff roster
        .route("/staff", get(handler::staff_roster).post(handler::create_staff))
        .route("/staff/{email}", delete(handler::delete_staff))
        // Aggregates
        .route("/stats", get(handler::stats))
        .layer(middleware::from_fn_with_state(
            state,
            require_role(&[Role::Admin]),
        ))
}
