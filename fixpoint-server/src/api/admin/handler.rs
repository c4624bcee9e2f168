//! Admin API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::api::convert::{actor_for, refusal_error};
use crate::auth::RoleContext;
use crate::core::ServerState;
use crate::db::repository::{IssueRepository, UserRepository};
use crate::utils::validation::{MAX_EMAIL_LEN, validate_required_text};
use shared::client::{AdminStats, AssignRequest, BlockRequest, RejectRequest, StatusUpdateRequest, UserList};
use shared::issue::{IssueAction, IssueStatus};
use shared::models::{Issue, Role, StaffCreate, StaffRef, User};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

fn issue_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::IssueNotFound, format!("Issue {} not found", id))
}

#[derive(Debug, Deserialize)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
}

/// All issues, optionally filtered by status
pub async fn issues(
    State(state): State<ServerState>,
    Query(filter): Query<IssueFilter>,
) -> AppResult<Json<Vec<Issue>>> {
    let repo = IssueRepository::new(state.db.clone());
    let issues = repo.find_all(filter.status).await?;
    Ok(Json(issues))
}

/// Assign a staff member to an issue
///
/// Pending issues move to In-Progress; In-Progress/Working issues only get
/// a missing assignment filled in.
pub async fn assign(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<Issue>> {
    let users = UserRepository::new(state.db.clone());
    let staff_user = users
        .find_by_email(&payload.staff_email)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::StaffNotFound,
                format!("Staff {} not found", payload.staff_email),
            )
        })?;

    if staff_user.resolved_role() != Some(Role::Staff) {
        return Err(AppError::with_message(
            ErrorCode::StaffNotFound,
            format!("User {} is not a staff member", payload.staff_email),
        ));
    }
    if staff_user.is_blocked {
        return Err(AppError::blocked());
    }

    let staff_ref = StaffRef {
        email: staff_user.email.clone(),
        name: staff_user.name.clone(),
        department: staff_user.department.clone().unwrap_or_default(),
    };

    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    let outcome = shared::transition(
        &issue,
        &IssueAction::Assign { staff: &staff_ref },
        &actor_for(&ctx),
        now_millis(),
    )
    .map_err(refusal_error)?;
    outcome.apply_to(&mut issue);

    let saved = repo.save(&issue).await?;
    tracing::info!(
        issue_id = id,
        staff = %staff_ref.email,
        admin = %ctx.user.email,
        "Issue assigned"
    );
    state.record_change("issue", &saved.id.to_string(), "updated");
    Ok(Json(saved))
}

/// Reject a pending issue with a mandatory reason
pub async fn reject(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<Issue>> {
    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    let outcome = shared::transition(
        &issue,
        &IssueAction::Reject {
            reason: &payload.reason,
        },
        &actor_for(&ctx),
        now_millis(),
    )
    .map_err(refusal_error)?;
    outcome.apply_to(&mut issue);

    let saved = repo.save(&issue).await?;
    tracing::info!(issue_id = id, admin = %ctx.user.email, "Issue rejected");
    state.record_change("issue", &saved.id.to_string(), "updated");
    Ok(Json(saved))
}

/// Admin status update (e.g. closing a resolved issue)
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<Issue>> {
    let repo = IssueRepository::new(state.db.clone());
    let mut issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

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
    state.record_change("issue", &saved.id.to_string(), "updated");
    Ok(Json(saved))
}

/// Admin delete (legal for Rejected issues)
pub async fn delete_issue(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = IssueRepository::new(state.db.clone());
    let issue = repo.find_by_id(id).await?.ok_or_else(|| issue_not_found(id))?;

    shared::transition(&issue, &IssueAction::Delete, &actor_for(&ctx), now_millis())
        .map_err(refusal_error)?;

    let removed = repo.delete(id).await?;
    tracing::info!(issue_id = id, admin = %ctx.user.email, "Issue deleted");
    state.record_change("issue", &id.to_string(), "deleted");
    Ok(Json(removed))
}

/// All users, newest first
pub async fn users(State(state): State<ServerState>) -> AppResult<Json<UserList>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(UserList {
        total: users.len() as u64,
        users,
    }))
}

/// Block or unblock a user
pub async fn block(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(email): Path<String>,
    Json(payload): Json<BlockRequest>,
) -> AppResult<Json<User>> {
    if email == ctx.user.email {
        return Err(AppError::invalid("Cannot block your own account".to_string()));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.set_blocked(&email, payload.blocked).await?;

    tracing::info!(
        target = %email,
        blocked = payload.blocked,
        admin = %ctx.user.email,
        "User block flag changed"
    );
    state.record_change("user", &email, "updated");
    Ok(Json(user))
}

/// Staff roster
pub async fn staff_roster(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let staff = repo.find_by_role(Role::Staff.as_str()).await?;
    Ok(Json(staff))
}

/// Create a staff account
pub async fn create_staff(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<User>> {
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.name, "name", 200)?;
    validate_required_text(&payload.department, "department", 200)?;

    let repo = UserRepository::new(state.db.clone());
    let staff = repo.create_staff(payload).await?;

    tracing::info!(staff = %staff.email, admin = %ctx.user.email, "Staff account created");
    state.record_change("user", &staff.email, "created");
    Ok(Json(staff))
}

/// Delete a staff account (citizen records are never deleted)
pub async fn delete_staff(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Path(email): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    let removed = repo.delete_staff(&email).await?;

    tracing::info!(staff = %email, admin = %ctx.user.email, "Staff account deleted");
    state.record_change("user", &email, "deleted");
    Ok(Json(removed))
}

/// Platform-wide aggregates for the admin dashboard
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AdminStats>> {
    let issues = IssueRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());

    Ok(Json(AdminStats {
        issues: issues.stats_all().await?,
        total_users: users.count().await?,
        total_staff: users.count_by_role(Role::Staff.as_str()).await?,
        premium_users: users.count_premium().await?,
    }))
}
