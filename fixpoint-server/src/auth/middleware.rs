//! 认证与角色门禁中间件
//!
//! 两道相互独立的门，按固定顺序执行：
//! 1. [`require_auth`] - 是否存在已认证身份 (Bearer 令牌有效)
//! 2. [`require_role`] - 身份解析出的角色是否属于子树允许的角色集
//!
//! 角色门禁在子树根部挂载一次，整棵嵌套路由继承同一次判定。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::ErrorCode;
use shared::models::{Role, User};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use shared::AppError;

/// 角色门禁通过后注入请求扩展的上下文
///
/// 携带已加载的用户记录和解析出的角色，处理函数不必重查。
#[derive(Debug, Clone)]
pub struct RoleContext {
    pub user: User,
    pub role: Role,
}

/// 认证中间件 - 要求请求携带有效的 Bearer 令牌
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/health` (健康检查)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    if path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 角色集对应的拒绝错误码
fn denial_code(allowed: &[Role]) -> ErrorCode {
    match allowed {
        [Role::Admin] => ErrorCode::AdminRequired,
        [Role::Staff] => ErrorCode::StaffRequired,
        [Role::Citizen] => ErrorCode::CitizenRequired,
        _ => ErrorCode::RoleRequired,
    }
}

/// 角色门禁中间件 - 要求解析出的角色属于允许集
///
/// 角色始终从用户记录解析 ([`User::resolved_role`])，绝不信任令牌中的
/// 任何角色声明。规则按顺序：
///
/// 1. 无 [`CurrentUser`] (认证中间件未通过) → 401
/// 2. 无用户记录 → 403 (身份存在但从未注册)
/// 3. 账户被拉黑 → 403
/// 4. 角色无法识别 → 403 (未知角色串在任何子树都不放行)
/// 5. 角色不在允许集 → 403，消息中指明检测到的角色
/// 6. 否则放行，注入 [`RoleContext`]
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .nest("/api/admin", routes())
///     .layer(middleware::from_fn_with_state(state, require_role(&[Role::Admin])));
/// ```
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    State<ServerState>,
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>,
> + Clone {
    move |State(state): State<ServerState>, mut req: Request, next: Next| {
        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or_else(AppError::unauthorized)?;

            let repo = UserRepository::new(state.db.clone());
            let record = repo.find_by_email(&identity.email).await?;

            let Some(record) = record else {
                security_log!(
                    "WARN",
                    "role_gate_no_record",
                    email = identity.email.clone()
                );
                return Err(AppError::with_message(
                    ErrorCode::PermissionDenied,
                    "No user record for this identity",
                ));
            };

            if record.is_blocked {
                security_log!("WARN", "role_gate_blocked", email = identity.email.clone());
                return Err(AppError::blocked());
            }

            match record.resolved_role() {
                Some(role) if allowed.contains(&role) => {
                    req.extensions_mut().insert(RoleContext { user: record, role });
                    Ok(next.run(req).await)
                }
                Some(role) => {
                    security_log!(
                        "WARN",
                        "role_gate_denied",
                        email = identity.email.clone(),
                        detected_role = role.as_str()
                    );
                    Err(AppError::with_message(
                        denial_code(allowed),
                        format!("Access refused: role '{}' is not permitted here", role),
                    ))
                }
                None => {
                    security_log!(
                        "WARN",
                        "role_gate_unknown_role",
                        email = identity.email.clone(),
                        raw_role = record.role.clone().unwrap_or_default()
                    );
                    Err(AppError::new(ErrorCode::UnknownRole))
                }
            }
        })
    }
}
