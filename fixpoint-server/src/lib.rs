//! FixPoint Server - 市政设施问题上报平台后端
//!
//! # 架构概述
//!
//! 本模块是 FixPoint 后端的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): Bearer 令牌验证 + 角色门禁
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//! - **支付** (`payments`): 支付网关 (boost / subscription)
//!
//! # 模块结构
//!
//! ```text
//! fixpoint-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 令牌验证、角色门禁
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── payments/      # 支付网关
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payments;
pub mod utils;

// Re-export 公共类型
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub use shared::{AppError, AppResult};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
