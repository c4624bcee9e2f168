use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payments::{HttpPaymentProvider, PaymentProvider};

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 每次资源变更后递增版本号；客户端通过版本号判断本地缓存组
/// ("issue" / "user" / "stats") 是否过期。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// 当前全部版本号快照
    pub fn snapshot(&self) -> std::collections::HashMap<String, u64> {
        self.versions
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | 令牌验证服务 |
/// | payments | Arc<dyn PaymentProvider> | 支付网关 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 验证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 支付网关
    pub payments: Arc<dyn PaymentProvider>,
    /// 资源版本管理器 (客户端缓存失效)
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            payments,
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/fixpoint.db)
    /// 3. JWT 服务、支付网关
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("fixpoint.db");
        let db_service = DbService::new(&db_path)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payments: Arc<dyn PaymentProvider> =
            Arc::new(HttpPaymentProvider::new(config.payment_provider_url.clone()));

        Self::new(config.clone(), db_service.db, jwt_service, payments)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 记录资源变更 (递增版本号)
    ///
    /// # 参数
    /// - `resource`: 资源类型 ("issue", "user", "payment", "stats")
    /// - `id`: 资源 ID
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    pub fn record_change(&self, resource: &str, id: &str, action: &str) {
        let version = self.resource_versions.increment(resource);
        tracing::debug!(
            resource = resource,
            id = id,
            action = action,
            version = version,
            "Resource changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_versions_increment() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("issue"), 0);
        assert_eq!(versions.increment("issue"), 1);
        assert_eq!(versions.increment("issue"), 2);
        assert_eq!(versions.increment("user"), 1);
        assert_eq!(versions.get("issue"), 2);

        let snapshot = versions.snapshot();
        assert_eq!(snapshot.get("issue"), Some(&2));
        assert_eq!(snapshot.get("user"), Some(&1));
    }
}
