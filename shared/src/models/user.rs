//! User Model
//!
//! Users are keyed by email (the stable identity from the external identity
//! provider). Roles live on the user record, never in the bearer token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Determines which dashboard subtree and which actions are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Staff,
    Admin,
}

impl Role {
    /// Parse a raw role string; `None` for anything unrecognized
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "citizen" => Some(Role::Citizen),
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Normalize a stored role value.
    ///
    /// A missing (or empty) role field defaults to Citizen. An unrecognized
    /// value stays unrecognized (`None`) so that it can never pass a role
    /// gate.
    pub fn normalize(raw: Option<&str>) -> Option<Role> {
        match raw {
            None | Some("") => Some(Role::Citizen),
            Some(s) => Role::parse(s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    /// Root path of this role's dashboard subtree
    pub fn dashboard_root(&self) -> &'static str {
        match self {
            Role::Citizen => "/dashboard/citizen",
            Role::Staff => "/dashboard/staff",
            Role::Admin => "/dashboard/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record
///
/// The `role` field is stored raw; use [`User::resolved_role`] at every
/// authorization seam so unrecognized values deny instead of granting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Set for staff users only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub issues_reported: u32,
    pub created_at: i64,
}

impl User {
    /// Resolve the stored role to the typed role set
    ///
    /// Missing role defaults to Citizen; unrecognized strings resolve to
    /// `None` and must be denied everywhere.
    pub fn resolved_role(&self) -> Option<Role> {
        Role::normalize(self.role.as_deref())
    }
}

/// Upsert-on-login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpsert {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Profile update payload (self-service)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create staff payload (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub email: String,
    pub name: String,
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("citizen"), Some(Role::Citizen));
        assert_eq!(Role::parse("staff"), Some(Role::Staff));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_role_normalize_defaults_to_citizen() {
        assert_eq!(Role::normalize(None), Some(Role::Citizen));
        assert_eq!(Role::normalize(Some("")), Some(Role::Citizen));
    }

    #[test]
    fn test_role_normalize_rejects_unknown() {
        assert_eq!(Role::normalize(Some("root")), None);
        assert_eq!(Role::normalize(Some("moderator")), None);
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Staff).unwrap();
        assert_eq!(json, "\"staff\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_user_resolved_role() {
        let mut user = User {
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            photo_url: None,
            phone: None,
            role: None,
            department: None,
            is_premium: false,
            is_blocked: false,
            issues_reported: 0,
            created_at: 0,
        };
        assert_eq!(user.resolved_role(), Some(Role::Citizen));

        user.role = Some("staff".to_string());
        assert_eq!(user.resolved_role(), Some(Role::Staff));

        user.role = Some("owner".to_string());
        assert_eq!(user.resolved_role(), None);
    }
}
