//! Auth service seam.
//!
//! Credential verification belongs to a hosted service; [`ConfigAuth`]
//! stands at that seam with accounts loaded from a config file plus
//! environment overrides.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::Session;

/// Errors from the auth service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email/password pair did not match any account.
    #[error("Invalid email or password")]
    InvalidCredential,

    /// The service could not be reached or is not configured.
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// Credential-based sign-in and sign-out.
pub trait AuthService: Send + Debug {
    /// Verify credentials and mint a session.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Release the session on the service side.
    fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

/// One configured account.
#[derive(Debug, Clone, Deserialize)]
struct Account {
    email: String,
    password: String,
}

/// Auth service backed by accounts from a config file.
///
/// The config file carries an `accounts` array:
///
/// ```toml
/// [[accounts]]
/// email = "user@example.com"
/// password = "hunter2"
/// ```
///
/// Settings may be overridden through `HEARTHWATCH_`-prefixed environment
/// variables.
#[derive(Debug)]
pub struct ConfigAuth {
    accounts: Vec<Account>,
}

impl ConfigAuth {
    /// Load accounts from the given config file.
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("HEARTHWATCH"))
            .build()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let accounts: Vec<Account> = config
            .get("accounts")
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        Ok(Self { accounts })
    }

    /// Build directly from email/password pairs (tests, embedding).
    pub fn with_accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            accounts: accounts
                .into_iter()
                .map(|(email, password)| Account {
                    email: email.into(),
                    password: password.into(),
                })
                .collect(),
        }
    }

    fn mint_token(email: &str) -> String {
        let mut hasher = DefaultHasher::new();
        email.hash(&mut hasher);
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

impl AuthService for ConfigAuth {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let matched = self
            .accounts
            .iter()
            .any(|a| a.email == email && a.password == password);

        if matched {
            info!("Signed in as {}", email);
            Ok(Session {
                email: email.to_string(),
                token: Self::mint_token(email),
            })
        } else {
            Err(AuthError::InvalidCredential)
        }
    }

    fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        info!("Signed out {}", session.email);
        Ok(())
    }
}
