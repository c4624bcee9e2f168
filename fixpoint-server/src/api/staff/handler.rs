//! Staff API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::api::convert::{actor_for, refusal_error};
use crate::auth::RoleContext;
use crate::core::ServerState;
use crate::db::repository::IssueRepository;
use shared::client::{IssueStats, StatusUpdateRequest};
use shared::issue::IssueAction;
use shared::models::Issue;
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "issue";

/// Issues assigned to the calling staff member
pub async fn assigned_issues(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
) -> AppResult<Json<Vec<Issue>>> {
    let repo = IssueRepository::new(state.db.clone());
    let issues = repo.find_by_staff(&ctx.user.email).await?;
    Ok(Json(issues))
}

/// Set the status of an assigned issue
///
/// The state machine enforces the assigned-staff relationship and the legal
/// target set; a no-op target (same status) is refused.
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<Issue>> {
    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::IssueNotFound, format!("Issue {} not found", id))
    })?;

    let outcome = shared::transition(
        &issue,
        &IssueAction::SetStatus {
            target: payload.status,
        },
        &actor_for(&ctx),
        now_millis(),
    )
    .map_err(refusal_error)?;
    outcome.apply_to(&mut issue);

    let saved = repo.save(&issue).await?;
    tracing::info!(
        issue_id = id,
        staff = %ctx.user.email,
        status = %saved.status,
        "Issue status updated"
    );
    state.record_change(RESOURCE, &saved.id.to_string(), "updated");
    Ok(Json(saved))
}

/// Status counts over the calling staff member's assignments
pub async fn stats(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
) -> AppResult<Json<IssueStats>> {
    let repo = IssueRepository::new(state.db.clone());
    let stats = repo.stats_for_staff(&ctx.user.email).await?;
    Ok(Json(stats))
}
