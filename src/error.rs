//! # Error Handling
//!
//! This module defines the error type shared by every ceremony phase.
//!
//! Every failure is terminal for the ceremony that raised it: there is no
//! retry, fallback, or partial-success state. Presentation of a failure
//! (dialogs, exit codes) is the caller's responsibility.

use crate::authenticator::AuthenticatorError;
use thiserror::Error;

/// Ceremony-wide error type
///
/// `ServerRejected`, `NoCredential`, and `Authenticator` are the protocol
/// outcomes; `Http` and `Serialization` are transport-level faults that are
/// treated exactly the same way: the ceremony aborts and the error reaches
/// the caller unchanged.
#[derive(Error, Debug)]
pub enum CeremonyError {
    /// The server answered a ceremony phase with a non-success response.
    /// The message is the response body text, verbatim.
    #[error("server rejected: {0}")]
    ServerRejected(String),

    /// The local authenticator completed without producing a credential
    /// (user dismissed the prompt, or the platform refused). The server is
    /// not contacted after this.
    #[error("authenticator produced no credential")]
    NoCredential,

    /// The local authenticator capability itself faulted (hardware error,
    /// user cancellation raised as an error). Propagated unchanged.
    #[error("authenticator error: {0}")]
    Authenticator(#[from] AuthenticatorError),

    /// HTTP request failed before a response could be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using CeremonyError
pub type CeremonyResult<T> = Result<T, CeremonyError>;
