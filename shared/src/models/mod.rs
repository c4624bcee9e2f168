//! Data models shared between server and client

pub mod issue;
pub mod payment;
pub mod user;

pub use issue::{Category, Issue, IssueCreate, IssueUpdate, StaffRef, TimelineEntry};
pub use payment::{Payment, PaymentKind, BOOST_PRICE, FREE_REPORT_LIMIT, SUBSCRIPTION_PRICE};
pub use user::{ProfileUpdate, Role, StaffCreate, User, UserUpsert};
