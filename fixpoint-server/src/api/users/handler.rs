//! User API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::validation::{MAX_EMAIL_LEN, validate_required_text};
use shared::models::{ProfileUpdate, Role, User, UserUpsert};
use shared::{AppError, AppResult};

const RESOURCE: &str = "user";

/// Upsert-on-login: first sight creates a citizen record, later logins
/// refresh name/photo. The payload identity must match the bearer identity.
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UserUpsert>,
) -> AppResult<Json<User>> {
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.name, "name", 200)?;

    if payload.email != current.email {
        return Err(AppError::forbidden(
            "Cannot register a record for another identity".to_string(),
        ));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.upsert(payload).await?;

    state.record_change(RESOURCE, &user.email, "upserted");
    Ok(Json(user))
}

/// Get a user record by email (self, or admin)
///
/// This is the role-resolution endpoint: clients resolve the session role
/// from the record returned here.
pub async fn get_by_email(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());

    if email != current.email {
        // Only admins may read someone else's record
        let requester = repo
            .find_by_email(&current.email)
            .await?
            .ok_or_else(|| AppError::forbidden("No user record for this identity".to_string()))?;
        if requester.resolved_role() != Some(Role::Admin) {
            return Err(AppError::forbidden(
                "Cannot read another user's record".to_string(),
            ));
        }
    }

    let user = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::with_message(shared::ErrorCode::UserNotFound, format!("User {} not found", email)))?;
    Ok(Json(user))
}

/// Update own profile fields (name / photo / phone)
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(email): Path<String>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<User>> {
    if email != current.email {
        return Err(AppError::forbidden(
            "Cannot edit another user's profile".to_string(),
        ));
    }
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", 200)?;
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update_profile(&email, payload).await?;

    state.record_change(RESOURCE, &user.email, "updated");
    Ok(Json(user))
}
