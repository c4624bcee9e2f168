use crate::auth::JwtConfig;
use shared::models::{BOOST_PRICE, FREE_REPORT_LIMIT, SUBSCRIPTION_PRICE};

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/fixpoint | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_PROVIDER_URL | http://localhost:4242 | 支付网关地址 |
/// | BOOST_PRICE | 100 | Boost 价格 |
/// | SUBSCRIPTION_PRICE | 1000 | 订阅价格 |
/// | FREE_REPORT_LIMIT | 3 | 免费用户上报上限 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/fixpoint HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 支付网关 URL
    pub payment_provider_url: String,
    /// Boost 价格 (货币单位)
    pub boost_price: i64,
    /// 订阅价格 (货币单位)
    pub subscription_price: i64,
    /// 免费用户上报上限
    pub free_report_limit: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/fixpoint".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payment_provider_url: std::env::var("PAYMENT_PROVIDER_URL")
                .unwrap_or_else(|_| "http://localhost:4242".into()),
            boost_price: std::env::var("BOOST_PRICE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(BOOST_PRICE),
            subscription_price: std::env::var("SUBSCRIPTION_PRICE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(SUBSCRIPTION_PRICE),
            free_report_limit: std::env::var("FREE_REPORT_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(FREE_REPORT_LIMIT),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn log_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
