//! Issues API Module (市民子树)
//!
//! 整棵子树由市民角色门禁保护，门禁在子树根部判定一次。

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::Role;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/issues", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::report).get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/upvote", post(handler::upvote))
        .route("/{id}/timeline", get(handler::timeline))
        .route("/user/{email}", get(handler::list_by_user))
        .route("/stats/{email}", get(handler::stats))
        .layer(middleware::from_fn_with_state(
            state,
            require_role(&[Role::Citizen]),
        ))
}
