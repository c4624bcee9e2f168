//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查和资源版本
//! - [`users`] - 用户接口 (登录 upsert / 档案)
//! - [`issues`] - 市民问题接口 (上报 / 浏览 / 编辑 / 点赞)
//! - [`staff`] - 员工接口 (受理列表 / 状态更新)
//! - [`admin`] - 管理员接口 (指派 / 驳回 / 用户管理)
//! - [`payments`] - 支付接口 (boost / 订阅)
//!
//! 认证中间件挂载在整棵 API 树上；角色门禁挂载在各自子树根部，
//! 子树内所有嵌套路由继承同一次判定。

pub mod convert;

pub mod admin;
pub mod health;
pub mod issues;
pub mod payments;
pub mod staff;
pub mod users;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the full API router
pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(issues::router(state.clone()))
        .merge(staff::router(state.clone()))
        .merge(admin::router(state.clone()))
        .merge(payments::router(state.clone()))
        .layer(middleware::from_fn_with_state(state, require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
