//! FixPoint client SDK
//!
//! The client-side core of the platform: a typed API client with bearer
//! attachment, the session object, the cached role resolver and the pure
//! route-guard decision function a UI shell consumes.
//!
//! The server stays authoritative for every rule; this crate mirrors the
//! access and lifecycle model so the UI can avoid offering actions that
//! would be refused, and re-fetches server state after every mutation.

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod roles;
pub mod session;

pub use client::FixPointClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{Decision, GuardRequest, guard};
pub use http::HttpClient;
pub use roles::{RoleResolution, RoleResolver};
pub use session::Session;
