//! Payment provider gateway
//!
//! The checkout provider is an external collaborator: we create a session,
//! hand its redirect URL to the client opaquely, and later ask the provider
//! what became of the session. The trait seam keeps the HTTP gateway and the
//! in-memory mock interchangeable.

pub mod mock;

pub use mock::MockPaymentProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::PaymentKind;
use shared::{AppError, AppResult, ErrorCode};

/// Provider-side view of a checkout session
///
/// `kind` and `reference` are our metadata echoed back by the provider, the
/// way checkout providers return session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSession {
    pub session_id: String,
    /// Redirect URL; opaque to us
    pub url: String,
    pub status: SessionStatus,
    /// Present once the session was paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub amount: i64,
    pub kind: PaymentKind,
    /// Domain reference: the boosted issue id, or the subscriber email
    pub reference: String,
}

/// Checkout session lifecycle at the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created, checkout not finished
    Pending,
    /// Paid and settled
    Paid,
    /// Abandoned or cancelled by the user
    Cancelled,
}

/// Request to open a checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub user_email: String,
    pub kind: PaymentKind,
    pub amount: i64,
    /// Domain reference: the boosted issue id, or the subscriber email
    pub reference: String,
}

/// Checkout provider seam
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Open a new checkout session
    async fn create_session(&self, request: &NewSession) -> AppResult<ProviderSession>;

    /// Look up a session; `None` if the provider does not know it
    async fn fetch_session(&self, session_id: &str) -> AppResult<Option<ProviderSession>>;
}

/// HTTP gateway to the real checkout provider
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn create_session(&self, request: &NewSession) -> AppResult<ProviderSession> {
        let response = self
            .client
            .post(self.url("v1/checkout/sessions"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::PaymentProviderError,
                    format!("Provider unreachable: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::PaymentProviderError,
                format!("Provider returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::PaymentProviderError,
                format!("Malformed provider response: {e}"),
            )
        })
    }

    async fn fetch_session(&self, session_id: &str) -> AppResult<Option<ProviderSession>> {
        let response = self
            .client
            .get(self.url(&format!("v1/checkout/sessions/{session_id}")))
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::PaymentProviderError,
                    format!("Provider unreachable: {e}"),
                )
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::PaymentProviderError,
                format!("Provider returned {}", response.status()),
            ));
        }

        response.json().await.map(Some).map_err(|e| {
            AppError::with_message(
                ErrorCode::PaymentProviderError,
                format!("Malformed provider response: {e}"),
            )
        })
    }
}
