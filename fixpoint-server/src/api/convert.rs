//! Conversions between auth context, domain actors and wire errors

use crate::auth::RoleContext;
use shared::issue::{Actor, ActorRole, Refusal};
use shared::models::Role;
use shared::AppError;

/// Build the state-machine actor for the gated request context
pub fn actor_for(ctx: &RoleContext) -> Actor<'_> {
    Actor {
        email: &ctx.user.email,
        name: &ctx.user.name,
        role: match ctx.role {
            Role::Citizen => ActorRole::Citizen,
            Role::Staff => ActorRole::Staff,
            Role::Admin => ActorRole::Admin,
        },
    }
}

/// Map a state-machine refusal onto the wire error
pub fn refusal_error(refusal: Refusal) -> AppError {
    AppError::with_message(refusal.error_code(), refusal.to_string())
}
