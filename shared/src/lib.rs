//! Shared types for the FixPoint platform
//!
//! Common types used across the server and client crates: the role model,
//! the issue lifecycle state machine, payment types, unified error codes
//! and the wire DTOs both sides exchange.

pub mod client;
pub mod error;
pub mod issue;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use issue::{Actor, ActorRole, IssueAction, IssueStatus, Outcome, Priority, Refusal, transition};
pub use models::{Category, Issue, Payment, PaymentKind, Role, StaffRef, TimelineEntry, User};
