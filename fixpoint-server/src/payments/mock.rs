//! In-memory checkout provider
//!
//! Used for local development and tests. Sessions start out pending; the
//! test (or a local operator) scripts the outcome with [`mark_paid`] /
//! [`mark_cancelled`].
//!
//! [`mark_paid`]: MockPaymentProvider::mark_paid
//! [`mark_cancelled`]: MockPaymentProvider::mark_cancelled

use super::{NewSession, PaymentProvider, ProviderSession, SessionStatus};
use async_trait::async_trait;
use dashmap::DashMap;
use shared::AppResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct MockPaymentProvider {
    sessions: DashMap<String, ProviderSession>,
    counter: AtomicU64,
}

impl MockPaymentProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script a session as paid; returns the generated transaction id
    pub fn mark_paid(&self, session_id: &str) -> Option<String> {
        let mut session = self.sessions.get_mut(session_id)?;
        let transaction_id = format!("txn_{}", session_id);
        session.status = SessionStatus::Paid;
        session.transaction_id = Some(transaction_id.clone());
        Some(transaction_id)
    }

    /// Script a session as cancelled
    pub fn mark_cancelled(&self, session_id: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.status = SessionStatus::Cancelled;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_session(&self, request: &NewSession) -> AppResult<ProviderSession> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let session_id = format!("cs_mock_{n}");
        let session = ProviderSession {
            session_id: session_id.clone(),
            url: format!("https://checkout.example/pay/{session_id}"),
            status: SessionStatus::Pending,
            transaction_id: None,
            amount: request.amount,
            kind: request.kind,
            reference: request.reference.clone(),
        };
        self.sessions.insert(session_id, session.clone());
        Ok(session)
    }

    async fn fetch_session(&self, session_id: &str) -> AppResult<Option<ProviderSession>> {
        Ok(self.sessions.get(session_id).map(|s| s.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentKind;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let provider = MockPaymentProvider::new();
        let session = provider
            .create_session(&NewSession {
                user_email: "alice@x.com".to_string(),
                kind: PaymentKind::Boost,
                amount: 100,
                reference: "42".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.status, SessionStatus::Pending);

        let txn = provider.mark_paid(&session.session_id).unwrap();
        let fetched = provider
            .fetch_session(&session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, SessionStatus::Paid);
        assert_eq!(fetched.transaction_id.as_deref(), Some(txn.as_str()));

        assert!(provider.fetch_session("cs_unknown").await.unwrap().is_none());
    }
}
