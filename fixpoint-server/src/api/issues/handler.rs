//! Issue API Handlers (citizen actions)

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::api::convert::{actor_for, refusal_error};
use crate::auth::RoleContext;
use crate::core::ServerState;
use crate::db::repository::{IssueRepository, UserRepository};
use crate::utils::validation::validate_payload;
use shared::client::IssueStats;
use shared::issue::IssueAction;
use shared::models::issue::{Issue, IssueCreate, IssueUpdate, TimelineEntry};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "issue";

fn issue_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::IssueNotFound, format!("Issue {} not found", id))
}

/// Report a new issue (free-tier cap applies)
pub async fn report(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Json(payload): Json<IssueCreate>,
) -> AppResult<Json<Issue>> {
    validate_payload(&payload)?;

    let user = &ctx.user;
    if !user.is_premium && user.issues_reported >= state.config.free_report_limit {
        return Err(AppError::new(ErrorCode::ReportLimitReached));
    }

    let issue = Issue::new(snowflake_id(), &user.email, &user.name, payload);
    let repo = IssueRepository::new(state.db.clone());
    let created = repo.create(&issue).await?;

    UserRepository::new(state.db.clone())
        .increment_reported(&user.email)
        .await?;

    tracing::info!(
        issue_id = created.id,
        reporter = %user.email,
        category = %created.category,
        "Issue reported"
    );
    state.record_change(RESOURCE, &created.id.to_string(), "created");

    Ok(Json(created))
}

/// Browse all issues
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Issue>>> {
    let repo = IssueRepository::new(state.db.clone());
    let issues = repo.find_all(None).await?;
    Ok(Json(issues))
}

/// Get one issue
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Issue>> {
    let repo = IssueRepository::new(state.db.clone());
    let issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;
    Ok(Json(issue))
}

/// Activity timeline of one issue
pub async fn timeline(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<TimelineEntry>>> {
    let repo = IssueRepository::new(state.db.clone());
    let issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;
    Ok(Json(issue.timeline))
}

/// One citizen's issues (self only)
pub async fn list_by_user(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Issue>>> {
    if email != ctx.user.email {
        return Err(AppError::forbidden(
            "Cannot list another user's issues".to_string(),
        ));
    }
    let repo = IssueRepository::new(state.db.clone());
    let issues = repo.find_by_reporter(&email).await?;
    Ok(Json(issues))
}

/// One citizen's issue stats (self only)
pub async fn stats(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(email): Path<String>,
) -> AppResult<Json<IssueStats>> {
    if email != ctx.user.email {
        return Err(AppError::forbidden(
            "Cannot read another user's stats".to_string(),
        ));
    }
    let repo = IssueRepository::new(state.db.clone());
    let stats = repo.stats_for_reporter(&email).await?;
    Ok(Json(stats))
}

/// Edit title/description/category/location while Pending (owner only)
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
    Json(payload): Json<IssueUpdate>,
) -> AppResult<Json<Issue>> {
    validate_payload(&payload)?;

    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    let outcome = shared::transition(&issue, &IssueAction::Edit, &actor_for(&ctx), now_millis())
        .map_err(refusal_error)?;
    outcome.apply_to(&mut issue);

    if let Some(title) = payload.title {
        issue.title = title;
    }
    if let Some(description) = payload.description {
        issue.description = description;
    }
    if let Some(category) = payload.category {
        issue.category = category;
    }
    if let Some(location) = payload.location {
        issue.location = location;
    }

    let saved = repo.save(&issue).await?;
    state.record_change(RESOURCE, &saved.id.to_string(), "updated");
    Ok(Json(saved))
}

/// Delete an issue (owner while Pending; owner or admin once Rejected)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = IssueRepository::new(state.db.clone());
    let issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    shared::transition(&issue, &IssueAction::Delete, &actor_for(&ctx), now_millis())
        .map_err(refusal_error)?;

    let removed = repo.delete(id).await?;
    tracing::info!(issue_id = id, actor = %ctx.user.email, "Issue deleted");
    state.record_change(RESOURCE, &id.to_string(), "deleted");
    Ok(Json(removed))
}

/// Upvote an issue (any citizen except the reporter; idempotent)
pub async fn upvote(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Issue>> {
    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    let outcome = shared::transition(&issue, &IssueAction::Upvote, &actor_for(&ctx), now_millis())
        .map_err(refusal_error)?;

    // Duplicate upvote: no write, return current state
    if outcome.upvoter.is_none() {
        return Ok(Json(issue));
    }

    outcome.apply_to(&mut issue);
    let saved = repo.save(&issue).await?;
    state.record_change(RESOURCE, &saved.id.to_string(), "updated");
    Ok(Json(saved))
}
