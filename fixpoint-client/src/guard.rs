//! Route guard
//!
//! Pure decision function gating a dashboard subtree. Two independent gates
//! evaluated in strict order: authenticated-at-all, then role-membership.
//! The guard is evaluated once at the subtree root; nested routes inherit
//! the decision.

use crate::roles::RoleResolution;
use shared::models::Role;

/// Inputs to one guard evaluation
#[derive(Debug, Clone)]
pub struct GuardRequest<'a> {
    /// Identity of the authenticated principal, if any
    pub principal: Option<&'a str>,
    /// The auth state itself is still being established
    pub auth_loading: bool,
    /// Current role resolution for the principal
    pub resolution: &'a RoleResolution,
    /// Roles permitted into this subtree
    pub allowed: &'a [Role],
    /// Originally requested path, echoed into the login redirect
    pub requested_path: &'a str,
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Auth or role lookup still in flight: render a neutral loading state,
    /// do not redirect
    Wait,
    /// No authenticated principal: go to login, come back afterwards
    RedirectToLogin { return_to: String },
    /// Authenticated but not permitted here
    Deny {
        /// Role the principal resolved to, when one was recognized
        detected: Option<Role>,
        /// Message for the denial view
        message: String,
        /// The principal's own dashboard root, when known
        redirect: Option<&'static str>,
    },
    /// Render the subtree
    Allow,
}

/// Evaluate the guard rules, in strict order:
///
/// 1. any relevant loading flag → [`Decision::Wait`] (unknown is not denied)
/// 2. no principal → [`Decision::RedirectToLogin`] carrying the requested path
/// 3. role known but not in the allowed set → [`Decision::Deny`] naming the
///    detected role; an unrecognized or errored resolution also denies,
///    since unknown can never be an implicit grant
/// 4. otherwise → [`Decision::Allow`]
pub fn guard(request: &GuardRequest<'_>) -> Decision {
    if request.auth_loading || request.resolution.is_loading {
        return Decision::Wait;
    }

    if request.principal.is_none() {
        return Decision::RedirectToLogin {
            return_to: request.requested_path.to_string(),
        };
    }

    if let Some(error) = &request.resolution.error {
        return Decision::Deny {
            detected: None,
            message: format!("Could not verify your access: {error}"),
            redirect: None,
        };
    }

    match request.resolution.role {
        Some(role) if request.allowed.contains(&role) => Decision::Allow,
        Some(role) => Decision::Deny {
            detected: Some(role),
            message: format!("Access refused: you are signed in as {role}"),
            redirect: Some(role.dashboard_root()),
        },
        None => Decision::Deny {
            detected: None,
            message: "Access refused: your account has no recognized role".to_string(),
            redirect: None,
        },
    }
}
