//! Payment API Handlers
//!
//! 两步流程：create-checkout-session 开启会话并把重定向 URL 原样交给
//! 客户端；provider 重定向回来后客户端调 verify，服务端向 provider 查询
//! 会话结果并落库。验证按 transaction_id 幂等。

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::api::convert::{actor_for, refusal_error};
use crate::auth::RoleContext;
use crate::core::ServerState;
use crate::db::repository::{IssueRepository, PaymentRepository, RepoError, UserRepository};
use crate::payments::{NewSession, SessionStatus};
use shared::client::{CheckoutSessionRequest, CheckoutSessionResponse, VerifyPaymentRequest};
use shared::issue::{IssueAction, Priority, Refusal};
use shared::models::{Payment, PaymentKind};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};

/// Open a checkout session for a boost or a subscription
pub async fn create_checkout_session(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> AppResult<Json<CheckoutSessionResponse>> {
    let user = &ctx.user;

    let (amount, reference) = match payload.kind {
        PaymentKind::Boost => {
            let issue_id = payload.issue_id.ok_or_else(|| {
                AppError::validation("issue_id is required for boost payments".to_string())
            })?;
            let issue = IssueRepository::new(state.db.clone())
                .find_by_id(issue_id)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::IssueNotFound,
                        format!("Issue {} not found", issue_id),
                    )
                })?;
            if issue.reporter_email != user.email {
                return Err(AppError::new(ErrorCode::NotIssueOwner));
            }
            // Refuse up front so an already-High issue never gets charged
            if issue.priority == Priority::High {
                return Err(AppError::new(ErrorCode::AlreadyHighPriority));
            }
            (state.config.boost_price, issue_id.to_string())
        }
        PaymentKind::Subscription => {
            if user.is_premium {
                return Err(AppError::new(ErrorCode::AlreadyPremium));
            }
            (state.config.subscription_price, user.email.clone())
        }
    };

    let session = state
        .payments
        .create_session(&NewSession {
            user_email: user.email.clone(),
            kind: payload.kind,
            amount,
            reference,
        })
        .await?;

    tracing::info!(
        session_id = %session.session_id,
        kind = %payload.kind,
        user = %user.email,
        "Checkout session created"
    );

    Ok(Json(CheckoutSessionResponse {
        session_id: session.session_id,
        url: session.url,
    }))
}

/// Verify a checkout session and record the payment
///
/// Outcomes map onto distinct error codes so the UI can distinguish
/// "cancelled, try again" from "verification failed, contact support".
pub async fn verify(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> AppResult<Json<Payment>> {
    let session = state
        .payments
        .fetch_session(&payload.session_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentSessionNotFound))?;

    match session.status {
        SessionStatus::Cancelled => Err(AppError::new(ErrorCode::PaymentCancelled)),
        SessionStatus::Pending => Err(AppError::new(ErrorCode::PaymentVerificationFailed)),
        SessionStatus::Paid => {
            let transaction_id = session.transaction_id.clone().ok_or_else(|| {
                AppError::new(ErrorCode::PaymentVerificationFailed)
            })?;

            let payments = PaymentRepository::new(state.db.clone());

            // Idempotent: an already-recorded transaction returns the
            // existing record, never a second charge or effect
            if let Some(existing) = payments.find_by_transaction(&transaction_id).await? {
                return Ok(Json(existing));
            }

            let issue_id = match session.kind {
                PaymentKind::Boost => Some(session.reference.parse::<i64>().map_err(|_| {
                    AppError::new(ErrorCode::PaymentVerificationFailed)
                })?),
                PaymentKind::Subscription => None,
            };

            let payment = Payment {
                id: snowflake_id(),
                user_email: ctx.user.email.clone(),
                user_name: ctx.user.name.clone(),
                kind: session.kind,
                amount: session.amount,
                transaction_id: transaction_id.clone(),
                issue_id,
                created_at: now_millis(),
            };

            let recorded = match payments.create(&payment).await {
                Ok(p) => p,
                // Lost a race with a concurrent verify of the same session
                Err(RepoError::Duplicate(_)) => {
                    return payments
                        .find_by_transaction(&transaction_id)
                        .await?
                        .map(Json)
                        .ok_or_else(|| AppError::new(ErrorCode::PaymentAlreadyRecorded));
                }
                Err(e) => return Err(e.into()),
            };

            apply_payment_effect(&state, &ctx, &recorded).await?;

            tracing::info!(
                transaction_id = %transaction_id,
                kind = %recorded.kind,
                user = %ctx.user.email,
                "Payment verified and recorded"
            );
            state.record_change("payment", &transaction_id, "created");

            Ok(Json(recorded))
        }
    }
}

/// Apply the domain effect of a recorded payment
async fn apply_payment_effect(
    state: &ServerState,
    ctx: &RoleContext,
    payment: &Payment,
) -> AppResult<()> {
    match payment.kind {
        PaymentKind::Boost => {
            let issue_id = payment
                .issue_id
                .ok_or_else(|| AppError::new(ErrorCode::PaymentVerificationFailed))?;
            let repo = IssueRepository::new(state.db.clone());
            let mut issue = repo.find_by_id(issue_id).await?.ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::IssueNotFound,
                    format!("Issue {} not found", issue_id),
                )
            })?;

            match shared::transition(&issue, &IssueAction::Boost, &actor_for(ctx), now_millis()) {
                Ok(outcome) => {
                    outcome.apply_to(&mut issue);
                    repo.save(&issue).await?;
                    state.record_change("issue", &issue_id.to_string(), "updated");
                }
                // Already High (e.g. a racing verify applied first): nothing to do
                Err(Refusal::AlreadyHigh) => {}
                Err(refusal) => return Err(refusal_error(refusal)),
            }
        }
        PaymentKind::Subscription => {
            UserRepository::new(state.db.clone())
                .set_premium(&ctx.user.email, true)
                .await?;
            state.record_change("user", &ctx.user.email, "updated");
        }
    }
    Ok(())
}

/// Payment history for the calling user
pub async fn history(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RoleContext>,
) -> AppResult<Json<Vec<Payment>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo.list_by_user(&ctx.user.email).await?;
    Ok(Json(payments))
}
