//! User Repository
//!
//! Users are keyed by email: `type::thing('user', $email)`. Citizen records
//! are never hard-deleted; staff records can be removed by an admin.

use super::{BaseRepository, RepoError, RepoResult, content_without_id};
use shared::models::{ProfileUpdate, StaffCreate, User, UserUpsert};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * OMIT id FROM type::thing('user', $email)")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Upsert on login: create a citizen record on first sight, refresh
    /// name/photo afterwards. Role is never touched here.
    pub async fn upsert(&self, data: UserUpsert) -> RepoResult<User> {
        if let Some(existing) = self.find_by_email(&data.email).await? {
            self.base
                .db()
                .query(
                    r#"UPDATE type::thing('user', $email) MERGE {
                        name: $name,
                        photo_url: $photo_url
                    }"#,
                )
                .bind(("email", data.email.clone()))
                .bind(("name", data.name))
                .bind(("photo_url", data.photo_url.or(existing.photo_url)))
                .await?;
            return self
                .find_by_email(&data.email)
                .await?
                .ok_or_else(|| RepoError::Database("Failed to update user".to_string()));
        }

        let user = User {
            email: data.email.clone(),
            name: data.name,
            photo_url: data.photo_url,
            phone: None,
            role: Some("citizen".to_string()),
            department: None,
            is_premium: false,
            is_blocked: false,
            issues_reported: 0,
            created_at: now_millis(),
        };
        self.create(&user).await
    }

    async fn create(&self, user: &User) -> RepoResult<User> {
        let content = content_without_id(user)?;
        self.base
            .db()
            .query("CREATE type::thing('user', $email) CONTENT $data")
            .bind(("email", user.email.clone()))
            .bind(("data", content))
            .await?;

        self.find_by_email(&user.email)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update profile fields (self-service)
    pub async fn update_profile(&self, email: &str, data: ProfileUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))?;

        self.base
            .db()
            .query(
                r#"UPDATE type::thing('user', $email) MERGE {
                    name: $name,
                    photo_url: $photo_url,
                    phone: $phone
                }"#,
            )
            .bind(("email", email.to_string()))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("photo_url", data.photo_url.or(existing.photo_url)))
            .bind(("phone", data.phone.or(existing.phone)))
            .await?;
        self.find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))
    }

    /// Set the stored role value.
    ///
    /// Role assignment is an operator action (admin bootstrap, staff
    /// promotion); it is never reachable from a client-asserted identity.
    pub async fn set_role(&self, email: &str, role: &str) -> RepoResult<User> {
        self.base
            .db()
            .query("UPDATE type::thing('user', $email) SET role = $role")
            .bind(("email", email.to_string()))
            .bind(("role", role.to_string()))
            .await?;
        self.find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))
    }

    /// Admin block/unblock
    pub async fn set_blocked(&self, email: &str, blocked: bool) -> RepoResult<User> {
        self.base
            .db()
            .query("UPDATE type::thing('user', $email) SET is_blocked = $blocked")
            .bind(("email", email.to_string()))
            .bind(("blocked", blocked))
            .await?;
        self.find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))
    }

    /// Premium upgrade after a verified subscription payment
    pub async fn set_premium(&self, email: &str, premium: bool) -> RepoResult<User> {
        self.base
            .db()
            .query("UPDATE type::thing('user', $email) SET is_premium = $premium")
            .bind(("email", email.to_string()))
            .bind(("premium", premium))
            .await?;
        self.find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))
    }

    /// Bump the reported-issues counter after a successful report
    pub async fn increment_reported(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE type::thing('user', $email) SET issues_reported += 1")
            .bind(("email", email.to_string()))
            .await?;
        Ok(())
    }

    /// List all users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * OMIT id FROM user ORDER BY created_at DESC")
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users)
    }

    /// List users with a given role
    pub async fn find_by_role(&self, role: &str) -> RepoResult<Vec<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * OMIT id FROM user WHERE role = $role ORDER BY created_at DESC")
            .bind(("role", role.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users)
    }

    /// Create a staff account (admin action)
    pub async fn create_staff(&self, data: StaffCreate) -> RepoResult<User> {
        if data.department.trim().is_empty() {
            return Err(RepoError::Validation(
                "Staff department is required".to_string(),
            ));
        }
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User '{}' already exists",
                data.email
            )));
        }

        let user = User {
            email: data.email,
            name: data.name,
            photo_url: None,
            phone: None,
            role: Some("staff".to_string()),
            department: Some(data.department),
            is_premium: false,
            is_blocked: false,
            issues_reported: 0,
            created_at: now_millis(),
        };
        self.create(&user).await
    }

    /// Delete a staff account. Citizen records are never hard-deleted.
    pub async fn delete_staff(&self, email: &str) -> RepoResult<bool> {
        let existing = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", email)))?;

        if existing.role.as_deref() != Some("staff") {
            return Err(RepoError::Validation(
                "Only staff accounts can be deleted".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE type::thing('user', $email)")
            .bind(("email", email.to_string()))
            .await?;
        Ok(true)
    }

    /// Total user count
    pub async fn count(&self) -> RepoResult<u64> {
        self.count_query("SELECT count() AS count FROM user GROUP ALL", None)
            .await
    }

    /// Count users with a given role
    pub async fn count_by_role(&self, role: &str) -> RepoResult<u64> {
        self.count_query(
            "SELECT count() AS count FROM user WHERE role = $param GROUP ALL",
            Some(role.to_string()),
        )
        .await
    }

    /// Count premium users
    pub async fn count_premium(&self) -> RepoResult<u64> {
        self.count_query(
            "SELECT count() AS count FROM user WHERE is_premium = true GROUP ALL",
            None,
        )
        .await
    }

    async fn count_query(&self, query: &str, param: Option<String>) -> RepoResult<u64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: u64,
        }

        let mut q = self.base.db().query(query);
        if let Some(param) = param {
            q = q.bind(("param", param));
        }
        let mut result = q.await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> UserRepository {
        let service = DbService::new_in_memory().await.unwrap();
        UserRepository::new(service.db)
    }

    fn alice() -> UserUpsert {
        UserUpsert {
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_citizen() {
        let repo = repo().await;
        let user = repo.upsert(alice()).await.unwrap();
        assert_eq!(user.email, "alice@x.com");
        assert_eq!(user.role.as_deref(), Some("citizen"));
        assert!(!user.is_premium);
        assert_eq!(user.issues_reported, 0);
    }

    #[tokio::test]
    async fn test_upsert_refreshes_without_touching_role() {
        let repo = repo().await;
        repo.upsert(alice()).await.unwrap();
        repo.create_staff(StaffCreate {
            email: "bob@x.com".to_string(),
            name: "Bob".to_string(),
            department: "Roads".to_string(),
        })
        .await
        .unwrap();

        // Bob logs in through the regular upsert path
        let bob = repo
            .upsert(UserUpsert {
                email: "bob@x.com".to_string(),
                name: "Robert".to_string(),
                photo_url: Some("https://img.example/bob.png".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(bob.name, "Robert");
        assert_eq!(bob.role.as_deref(), Some("staff"));
        assert_eq!(bob.department.as_deref(), Some("Roads"));
    }

    #[tokio::test]
    async fn test_block_and_premium_flags() {
        let repo = repo().await;
        repo.upsert(alice()).await.unwrap();

        let blocked = repo.set_blocked("alice@x.com", true).await.unwrap();
        assert!(blocked.is_blocked);

        let premium = repo.set_premium("alice@x.com", true).await.unwrap();
        assert!(premium.is_premium);
        assert!(premium.is_blocked);
    }

    #[tokio::test]
    async fn test_increment_reported() {
        let repo = repo().await;
        repo.upsert(alice()).await.unwrap();
        repo.increment_reported("alice@x.com").await.unwrap();
        repo.increment_reported("alice@x.com").await.unwrap();
        let user = repo.find_by_email("alice@x.com").await.unwrap().unwrap();
        assert_eq!(user.issues_reported, 2);
    }

    #[tokio::test]
    async fn test_staff_roster_management() {
        let repo = repo().await;
        repo.upsert(alice()).await.unwrap();

        let staff = repo
            .create_staff(StaffCreate {
                email: "bob@x.com".to_string(),
                name: "Bob".to_string(),
                department: "Roads".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(staff.role.as_deref(), Some("staff"));

        // Duplicate email refused
        let dup = repo
            .create_staff(StaffCreate {
                email: "bob@x.com".to_string(),
                name: "Bob 2".to_string(),
                department: "Water".to_string(),
            })
            .await;
        assert!(matches!(dup, Err(RepoError::Duplicate(_))));

        // Citizens cannot be deleted
        let result = repo.delete_staff("alice@x.com").await;
        assert!(matches!(result, Err(RepoError::Validation(_))));

        assert!(repo.delete_staff("bob@x.com").await.unwrap());
        assert!(repo.find_by_email("bob@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts() {
        let repo = repo().await;
        repo.upsert(alice()).await.unwrap();
        repo.create_staff(StaffCreate {
            email: "bob@x.com".to_string(),
            name: "Bob".to_string(),
            department: "Roads".to_string(),
        })
        .await
        .unwrap();
        repo.set_premium("alice@x.com", true).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_by_role("staff").await.unwrap(), 1);
        assert_eq!(repo.count_premium().await.unwrap(), 1);
    }
}
