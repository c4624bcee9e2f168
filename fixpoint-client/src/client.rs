//! Typed API client
//!
//! One wrapper per server route. Every mutation takes the server's returned
//! record as the single source of truth: the local cache entry is replaced
//! (or dropped) and the affected logical groups are invalidated, never
//! patched from an optimistic guess.

use crate::{ClientConfig, ClientError, ClientResult, HttpClient, RoleResolver, Session};
use dashmap::DashMap;
use serde_json::json;
use shared::client::{
    AdminStats, AssignRequest, BlockRequest, CheckoutSessionRequest, CheckoutSessionResponse,
    IssueStats, RejectRequest, StatusUpdateRequest, UserList, VerifyPaymentRequest,
};
use shared::issue::IssueStatus;
use shared::models::{
    FREE_REPORT_LIMIT, Issue, IssueCreate, IssueUpdate, Payment, PaymentKind, ProfileUpdate,
    StaffCreate, TimelineEntry, User, UserUpsert,
};

/// Entity cache keyed by issue id, with list/stat groups invalidated as a
/// whole on mutation
#[derive(Debug, Default)]
struct EntityCache {
    issues: DashMap<i64, Issue>,
    /// Logical list groups ("all", "user:{email}") → cached id lists
    lists: DashMap<String, Vec<i64>>,
}

impl EntityCache {
    fn put_issue(&self, issue: &Issue) {
        self.issues.insert(issue.id, issue.clone());
    }

    fn drop_issue(&self, id: i64) {
        self.issues.remove(&id);
    }

    fn invalidate_lists(&self) {
        self.lists.clear();
    }
}

/// FixPoint API client
pub struct FixPointClient {
    http: HttpClient,
    session: Session,
    resolver: RoleResolver,
    cache: EntityCache,
}

impl FixPointClient {
    pub fn new(config: ClientConfig) -> Self {
        let http = config.build_http_client();
        let resolver = RoleResolver::new(http.clone(), config.role_cache_ttl);
        Self {
            http,
            session: Session::new(),
            resolver,
            cache: EntityCache::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// HTTP client with the current session token attached
    fn authed(&self) -> HttpClient {
        match self.session.token() {
            Some(token) => self.http.clone().with_token(token),
            None => self.http.clone(),
        }
    }

    // ========== Session ==========

    /// Sign in: store the provider-issued bearer token, upsert the user
    /// record and install it into the session.
    pub async fn sign_in(
        &self,
        token: impl Into<String>,
        email: &str,
        name: &str,
        photo_url: Option<String>,
    ) -> ClientResult<User> {
        let token = token.into();
        let user: User = self
            .http
            .clone()
            .with_token(token.clone())
            .post(
                "api/users",
                &UserUpsert {
                    email: email.to_string(),
                    name: name.to_string(),
                    photo_url,
                },
            )
            .await?;

        self.session.set_user(user.clone(), token);
        self.resolver.invalidate(email);
        Ok(user)
    }

    /// Sign out: drop session, cached roles and entities
    pub fn sign_out(&self) {
        if let Some(identity) = self.session.identity() {
            self.resolver.invalidate(&identity);
        }
        self.session.clear();
        self.cache.issues.clear();
        self.cache.invalidate_lists();
    }

    /// Re-fetch the session user's record (after any payment or profile
    /// mutation the record is the source of truth)
    pub async fn refresh_session(&self) -> ClientResult<User> {
        let identity = self.session.identity().ok_or(ClientError::Unauthorized)?;
        let user: User = self.authed().get(&format!("api/users/{identity}")).await?;
        self.session.update_record(user.clone());
        Ok(user)
    }

    // ========== Users ==========

    pub async fn user(&self, email: &str) -> ClientResult<User> {
        self.authed().get(&format!("api/users/{email}")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let identity = self.session.identity().ok_or(ClientError::Unauthorized)?;
        let user: User = self
            .authed()
            .patch(&format!("api/users/{identity}"), update)
            .await?;
        self.session.update_record(user.clone());
        Ok(user)
    }

    // ========== Issues (citizen) ==========

    /// Report a new issue.
    ///
    /// The free-tier cap is checked here first so the UI can route straight
    /// to the subscription page without a round trip; the server check stays
    /// authoritative.
    pub async fn report_issue(&self, create: &IssueCreate) -> ClientResult<Issue> {
        if let Some(user) = self.session.user()
            && !user.is_premium
            && user.issues_reported >= FREE_REPORT_LIMIT
        {
            return Err(ClientError::Refused {
                code: shared::ErrorCode::ReportLimitReached.code(),
                message: shared::ErrorCode::ReportLimitReached.message().to_string(),
            });
        }

        let issue: Issue = self.authed().post("api/issues", create).await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        self.refresh_session().await?;
        Ok(issue)
    }

    /// Browse all issues
    pub async fn issues(&self) -> ClientResult<Vec<Issue>> {
        let issues: Vec<Issue> = self.authed().get("api/issues").await?;
        for issue in &issues {
            self.cache.put_issue(issue);
        }
        self.cache
            .lists
            .insert("all".to_string(), issues.iter().map(|i| i.id).collect());
        Ok(issues)
    }

    /// One issue, served from cache when present
    pub async fn issue(&self, id: i64) -> ClientResult<Issue> {
        if let Some(cached) = self.cache.issues.get(&id) {
            return Ok(cached.clone());
        }
        let issue: Issue = self.authed().get(&format!("api/issues/{id}")).await?;
        self.cache.put_issue(&issue);
        Ok(issue)
    }

    /// One issue, bypassing the cache
    pub async fn issue_fresh(&self, id: i64) -> ClientResult<Issue> {
        let issue: Issue = self.authed().get(&format!("api/issues/{id}")).await?;
        self.cache.put_issue(&issue);
        Ok(issue)
    }

    pub async fn my_issues(&self) -> ClientResult<Vec<Issue>> {
        let identity = self.session.identity().ok_or(ClientError::Unauthorized)?;
        let issues: Vec<Issue> = self
            .authed()
            .get(&format!("api/issues/user/{identity}"))
            .await?;
        self.cache
            .lists
            .insert(format!("user:{identity}"), issues.iter().map(|i| i.id).collect());
        for issue in &issues {
            self.cache.put_issue(issue);
        }
        Ok(issues)
    }

    pub async fn my_stats(&self) -> ClientResult<IssueStats> {
        let identity = self.session.identity().ok_or(ClientError::Unauthorized)?;
        self.authed()
            .get(&format!("api/issues/stats/{identity}"))
            .await
    }

    pub async fn edit_issue(&self, id: i64, update: &IssueUpdate) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .patch(&format!("api/issues/{id}"), update)
            .await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        Ok(issue)
    }

    pub async fn delete_issue(&self, id: i64) -> ClientResult<bool> {
        let removed: bool = self.authed().delete(&format!("api/issues/{id}")).await?;
        self.cache.drop_issue(id);
        self.cache.invalidate_lists();
        Ok(removed)
    }

    pub async fn upvote(&self, id: i64) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .post_empty(&format!("api/issues/{id}/upvote"))
            .await?;
        self.cache.put_issue(&issue);
        Ok(issue)
    }

    pub async fn timeline(&self, id: i64) -> ClientResult<Vec<TimelineEntry>> {
        self.authed().get(&format!("api/issues/{id}/timeline")).await
    }

    // ========== Staff ==========

    pub async fn assigned_issues(&self) -> ClientResult<Vec<Issue>> {
        let issues: Vec<Issue> = self.authed().get("api/staff/issues").await?;
        for issue in &issues {
            self.cache.put_issue(issue);
        }
        Ok(issues)
    }

    pub async fn set_status(&self, id: i64, status: IssueStatus) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .patch(
                &format!("api/staff/issues/{id}/status"),
                &StatusUpdateRequest { status },
            )
            .await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        Ok(issue)
    }

    pub async fn staff_stats(&self) -> ClientResult<IssueStats> {
        self.authed().get("api/staff/stats").await
    }

    // ========== Admin ==========

    pub async fn all_issues(&self, status: Option<IssueStatus>) -> ClientResult<Vec<Issue>> {
        let path = match status {
            Some(status) => format!("api/admin/issues?status={}", status.as_str()),
            None => "api/admin/issues".to_string(),
        };
        self.authed().get(&path).await
    }

    pub async fn assign_issue(&self, id: i64, staff_email: &str) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .post(
                &format!("api/admin/issues/{id}/assign"),
                &AssignRequest {
                    staff_email: staff_email.to_string(),
                },
            )
            .await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        Ok(issue)
    }

    pub async fn reject_issue(&self, id: i64, reason: &str) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .post(
                &format!("api/admin/issues/{id}/reject"),
                &RejectRequest {
                    reason: reason.to_string(),
                },
            )
            .await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        Ok(issue)
    }

    pub async fn close_issue(&self, id: i64) -> ClientResult<Issue> {
        let issue: Issue = self
            .authed()
            .patch(
                &format!("api/admin/issues/{id}/status"),
                &StatusUpdateRequest {
                    status: IssueStatus::Closed,
                },
            )
            .await?;
        self.cache.put_issue(&issue);
        self.cache.invalidate_lists();
        Ok(issue)
    }

    pub async fn users(&self) -> ClientResult<UserList> {
        self.authed().get("api/admin/users").await
    }

    pub async fn set_blocked(&self, email: &str, blocked: bool) -> ClientResult<User> {
        let user = self
            .authed()
            .patch(
                &format!("api/admin/users/{email}/block"),
                &BlockRequest { blocked },
            )
            .await?;
        self.resolver.invalidate(email);
        Ok(user)
    }

    pub async fn staff_roster(&self) -> ClientResult<Vec<User>> {
        self.authed().get("api/admin/staff").await
    }

    pub async fn create_staff(&self, staff: &StaffCreate) -> ClientResult<User> {
        let user = self.authed().post("api/admin/staff", staff).await?;
        self.resolver.invalidate(&staff.email);
        Ok(user)
    }

    pub async fn delete_staff(&self, email: &str) -> ClientResult<bool> {
        let removed = self
            .authed()
            .delete(&format!("api/admin/staff/{email}"))
            .await?;
        self.resolver.invalidate(email);
        Ok(removed)
    }

    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        self.authed().get("api/admin/stats").await
    }

    // ========== Payments ==========

    /// Open a checkout session; the returned URL is handed to the browser
    /// opaquely
    pub async fn create_checkout_session(
        &self,
        kind: PaymentKind,
        issue_id: Option<i64>,
    ) -> ClientResult<CheckoutSessionResponse> {
        self.authed()
            .post(
                "api/payments/create-checkout-session",
                &CheckoutSessionRequest { kind, issue_id },
            )
            .await
    }

    /// Verify a checkout session after the provider redirect.
    ///
    /// On success the affected records are re-fetched; the session record
    /// reflects a subscription immediately.
    pub async fn verify_payment(&self, session_id: &str) -> ClientResult<Payment> {
        let payment: Payment = self
            .authed()
            .post(
                "api/payments/verify",
                &VerifyPaymentRequest {
                    session_id: session_id.to_string(),
                },
            )
            .await?;

        match payment.kind {
            PaymentKind::Boost => {
                if let Some(issue_id) = payment.issue_id {
                    self.cache.drop_issue(issue_id);
                }
                self.cache.invalidate_lists();
            }
            PaymentKind::Subscription => {
                self.refresh_session().await?;
            }
        }
        Ok(payment)
    }

    pub async fn payment_history(&self) -> ClientResult<Vec<Payment>> {
        self.authed().get("api/payments/history").await
    }

    // ========== Misc ==========

    /// Server-side resource versions; a changed version invalidates the
    /// matching local cache group
    pub async fn resource_versions(&self) -> ClientResult<serde_json::Value> {
        let health: serde_json::Value = self.authed().get("api/health").await?;
        Ok(health.get("versions").cloned().unwrap_or_else(|| json!({})))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FixPointClient {
        FixPointClient::new(ClientConfig::new("http://127.0.0.1:1"))
    }

    fn premium_user(reported: u32, premium: bool) -> User {
        User {
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            photo_url: None,
            phone: None,
            role: Some("citizen".to_string()),
            department: None,
            is_premium: premium,
            is_blocked: false,
            issues_reported: reported,
            created_at: 0,
        }
    }

    fn sample_create() -> IssueCreate {
        IssueCreate {
            title: "Pothole".to_string(),
            description: "Deep".to_string(),
            category: shared::models::Category::Road,
            location: "Main St".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_free_tier_cap_blocks_client_side() {
        let client = client();
        client.session().set_user(premium_user(3, false), "token");

        let result = client.report_issue(&sample_create()).await;
        match result {
            Err(ClientError::Refused { code, message }) => {
                assert_eq!(code, 3007);
                assert!(message.contains("subscribe"));
            }
            other => panic!("expected Refused, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_premium_user_is_not_capped_client_side() {
        let client = client();
        client.session().set_user(premium_user(10, true), "token");

        // Passes the advisory check and fails on the (dead) network instead
        let result = client.report_issue(&sample_create()).await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }

    #[test]
    fn test_sign_out_clears_session_and_caches(){
        let client = client();
        client.session().set_user(premium_user(0, false), "token");
        client.resolver().prime("alice@x.com", Some(shared::models::Role::Citizen));

        client.sign_out();
        assert!(!client.session().is_authenticated());
        assert!(client.resolver().peek(Some("alice@x.com")).is_loading);
    }
}
