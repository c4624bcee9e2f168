//! Payments API Module (市民子树)
//!
//! Checkout 重定向 + 验证流程；会话 URL 对本服务不透明。

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::models::Role;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/payments", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/create-checkout-session", post(handler::create_checkout_session))
        .route("/verify", post(handler::verify))
        .route("/history", get(handler::history))
        .layer(middleware::from_fn_with_state(
            state,
            require_role(&[Role::Citizen]),
        ))
}
