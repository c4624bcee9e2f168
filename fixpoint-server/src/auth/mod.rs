//! 认证授权模块
//!
//! 提供 Bearer 令牌验证和角色门禁：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前身份上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_role`] - 角色门禁中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{RoleContext, require_auth, require_role};
