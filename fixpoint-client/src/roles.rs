//! Cached role resolution
//!
//! Resolves the signed-in principal's role from its user record
//! (`GET /api/users/{email}`) and caches the result per identity for a
//! short freshness window, so navigation does not refetch on every guard
//! evaluation.
//!
//! Policy:
//! - no identity → no network call, role unknown
//! - missing role field on the record → Citizen (the one safe default)
//! - unrecognized role string → unknown, which no gate accepts
//! - fetch error → error value; never treated as a role grant

use crate::{ClientError, HttpClient};
use dashmap::DashMap;
use shared::models::{Role, User};
use std::time::{Duration, Instant};

/// Result of a role lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleResolution {
    /// Resolved role; `None` while unknown (loading, error, unrecognized)
    pub role: Option<Role>,
    /// A lookup is in flight; callers must not make an authorization
    /// decision yet
    pub is_loading: bool,
    /// The lookup failed; treat as unknown, not as denied-or-granted
    pub error: Option<String>,
}

impl RoleResolution {
    fn resolved(role: Option<Role>) -> Self {
        Self {
            role,
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedRole {
    role: Option<Role>,
    fetched_at: Instant,
}

/// Per-identity role cache over the users endpoint
#[derive(Debug)]
pub struct RoleResolver {
    http: HttpClient,
    cache: DashMap<String, CachedRole>,
    ttl: Duration,
}

impl RoleResolver {
    pub fn new(http: HttpClient, ttl: Duration) -> Self {
        Self {
            http,
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Resolve the role for `identity`, fetching when the cache is stale.
    ///
    /// An absent identity short-circuits without a network call.
    pub async fn resolve(&self, identity: Option<&str>) -> RoleResolution {
        let Some(identity) = identity else {
            return RoleResolution::resolved(None);
        };

        if let Some(cached) = self.cache.get(identity)
            && cached.fetched_at.elapsed() < self.ttl
        {
            return RoleResolution::resolved(cached.role);
        }

        match self.http.get::<User>(&format!("api/users/{identity}")).await {
            Ok(user) => {
                let role = Role::normalize(user.role.as_deref());
                self.cache.insert(
                    identity.to_string(),
                    CachedRole {
                        role,
                        fetched_at: Instant::now(),
                    },
                );
                RoleResolution::resolved(role)
            }
            Err(e) => {
                tracing::warn!(identity = identity, error = %e, "Role lookup failed");
                RoleResolution {
                    role: None,
                    is_loading: false,
                    error: Some(match e {
                        ClientError::NotFound(msg) => msg,
                        other => other.to_string(),
                    }),
                }
            }
        }
    }

    /// Cached-only view: reports `is_loading` when a fetch would be needed.
    pub fn peek(&self, identity: Option<&str>) -> RoleResolution {
        let Some(identity) = identity else {
            return RoleResolution::resolved(None);
        };

        match self.cache.get(identity) {
            Some(cached) if cached.fetched_at.elapsed() < self.ttl => {
                RoleResolution::resolved(cached.role)
            }
            _ => RoleResolution {
                role: None,
                is_loading: true,
                error: None,
            },
        }
    }

    /// Drop the cached role for one identity (after sign-out or a role
    /// change made through the admin API)
    pub fn invalidate(&self, identity: &str) {
        self.cache.remove(identity);
    }

    /// Drop every cached role
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Seed the cache directly (tests and optimistic session bootstrap)
    pub fn prime(&self, identity: &str, role: Option<Role>) {
        self.cache.insert(
            identity.to_string(),
            CachedRole {
                role,
                fetched_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    fn resolver() -> RoleResolver {
        // Port 1 is never listening; any fetch attempt fails fast
        let http = HttpClient::new(&ClientConfig::new("http://127.0.0.1:1"));
        RoleResolver::new(http, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_absent_identity_short_circuits() {
        let resolver = resolver();
        let resolution = resolver.resolve(None).await;
        assert_eq!(resolution.role, None);
        assert!(!resolution.is_loading);
        assert!(resolution.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_as_error_not_grant() {
        let resolver = resolver();
        let resolution = resolver.resolve(Some("alice@x.com")).await;
        assert_eq!(resolution.role, None);
        assert!(resolution.error.is_some());
    }

    #[tokio::test]
    async fn test_cached_role_is_served_within_ttl() {
        let resolver = resolver();
        resolver.prime("alice@x.com", Some(Role::Staff));

        // Served from cache; no network touched (the URL would fail)
        let resolution = resolver.resolve(Some("alice@x.com")).await;
        assert_eq!(resolution.role, Some(Role::Staff));
        assert!(resolution.error.is_none());

        resolver.invalidate("alice@x.com");
        let resolution = resolver.peek(Some("alice@x.com"));
        assert!(resolution.is_loading);
    }

    #[test]
    fn test_peek_states() {
        let resolver = resolver();

        // No identity: known-unauthenticated, not loading
        let resolution = resolver.peek(None);
        assert!(!resolution.is_loading);
        assert_eq!(resolution.role, None);

        // Identity without cache: lookup pending
        let resolution = resolver.peek(Some("alice@x.com"));
        assert!(resolution.is_loading);
    }
}
