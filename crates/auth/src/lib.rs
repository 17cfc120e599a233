//! `toolscout-auth` — account payloads exchanged with the directory API.
//!
//! This crate is intentionally decoupled from HTTP: it only models what is
//! sent to `/api/auth/*` and what comes back. Session storage is owned by the
//! remote API.

pub mod credentials;
pub mod roles;
pub mod session;

pub use credentials::{Credentials, LoginRequest, RegisterRequest};
pub use roles::Role;
pub use session::{AccountProfile, AuthSession};
