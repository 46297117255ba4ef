//! Authentication and session management.
//!
//! The hosted auth service is an external collaborator; this module owns
//! the seam to it and the process-wide session state:
//!
//! - [`AuthService`]: sign-in/sign-out trait, implemented for
//!   config-file-backed credentials ([`ConfigAuth`])
//! - [`SessionContext`]: the single mutable session slot with an explicit
//!   list of listeners notified on every change
//! - [`SessionGuard`]: decides whether the dashboard route is reachable
//!
//! Any persisted session is restored before the first frame is drawn, so
//! the guard never races the auth-state resolution on startup.

mod service;
mod session;

pub use service::{AuthError, AuthService, ConfigAuth};
pub use session::{Session, SessionContext, SessionGuard, SESSION_KEY};
