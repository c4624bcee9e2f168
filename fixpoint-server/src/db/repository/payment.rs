//! Payment Repository
//!
//! 独立 payment 表，验证成功时写入。
//! transaction_id UNIQUE 索引保证幂等。

use super::{BaseRepository, RepoError, RepoResult, content_without_id};
use shared::models::Payment;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Projection mapping a stored record to the wire [`Payment`] shape
const PAYMENT_PROJECTION: &str = "record::id(id) AS id, user_email, user_name, kind, amount, \
     transaction_id, issue_id, created_at";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record a completed payment.
    ///
    /// The unique index on `transaction_id` turns a duplicate verification
    /// into [`RepoError::Duplicate`] so a session is never recorded twice.
    pub async fn create(&self, payment: &Payment) -> RepoResult<Payment> {
        let content = content_without_id(payment)?;
        let result = self
            .base
            .db()
            .query("CREATE type::thing('payment', $id) CONTENT $data")
            .bind(("id", payment.id))
            .bind(("data", content))
            .await;

        if let Err(e) = result {
            let msg = e.to_string().to_lowercase();
            if msg.contains("unique") || msg.contains("already exists") || msg.contains("duplicate")
            {
                return Err(RepoError::Duplicate(format!(
                    "Payment with transaction '{}' already recorded",
                    payment.transaction_id
                )));
            }
            return Err(RepoError::from(e));
        }

        self.find_by_id(payment.id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Payment>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PAYMENT_PROJECTION} FROM type::thing('payment', $id)"
            ))
            .bind(("id", id))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments.into_iter().next())
    }

    /// Find payment by provider transaction id
    pub async fn find_by_transaction(&self, transaction_id: &str) -> RepoResult<Option<Payment>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PAYMENT_PROJECTION} FROM payment WHERE transaction_id = $txn LIMIT 1"
            ))
            .bind(("txn", transaction_id.to_string()))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments.into_iter().next())
    }

    /// Payment history for a user, newest first
    pub async fn list_by_user(&self, email: &str) -> RepoResult<Vec<Payment>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PAYMENT_PROJECTION} FROM payment WHERE user_email = $email \
                 ORDER BY created_at DESC"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::PaymentKind;
    use shared::util::{now_millis, snowflake_id};

    async fn repo() -> PaymentRepository {
        let service = DbService::new_in_memory().await.unwrap();
        PaymentRepository::new(service.db)
    }

    fn boost_payment(txn: &str) -> Payment {
        Payment {
            id: snowflake_id(),
            user_email: "alice@x.com".to_string(),
            user_name: "Alice".to_string(),
            kind: PaymentKind::Boost,
            amount: 100,
            transaction_id: txn.to_string(),
            issue_id: Some(42),
            created_at: now_millis(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = repo().await;
        let payment = boost_payment("txn_1");
        let created = repo.create(&payment).await.unwrap();
        assert_eq!(created.transaction_id, "txn_1");
        assert_eq!(created.kind, PaymentKind::Boost);
        assert_eq!(created.issue_id, Some(42));

        let found = repo.find_by_transaction("txn_1").await.unwrap().unwrap();
        assert_eq!(found.id, payment.id);
    }

    #[tokio::test]
    async fn test_duplicate_transaction_refused() {
        let repo = repo().await;
        repo.create(&boost_payment("txn_dup")).await.unwrap();

        let second = repo.create(&boost_payment("txn_dup")).await;
        assert!(matches!(second, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let repo = repo().await;
        repo.create(&boost_payment("txn_a")).await.unwrap();
        repo.create(&boost_payment("txn_b")).await.unwrap();

        let history = repo.list_by_user("alice@x.com").await.unwrap();
        assert_eq!(history.len(), 2);

        let empty = repo.list_by_user("carol@x.com").await.unwrap();
        assert!(empty.is_empty());
    }
}
