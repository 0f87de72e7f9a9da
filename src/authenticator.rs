//! # Local Authenticator Contract
//!
//! The local authenticator (platform biometrics, a roaming security key,
//! ...) is an external capability with a fixed request/response shape: a
//! `create` call that mints a new credential and a `get` call that asserts
//! an existing one. This module defines that seam as a trait so the ceremony
//! flows stay independent of any concrete platform binding.
//!
//! The authenticator may decline (returning `None` when e.g. the user dismissed
//! the prompt) or fault (`AuthenticatorError`). Both are terminal for the
//! ceremony; neither is retried.

use crate::webauthn::types::{CredentialParameters, RelyingParty, UserDescriptor};
use async_trait::async_trait;
use thiserror::Error;

/// Credential type tag required by the ceremony protocol.
pub const PUBLIC_KEY_CREDENTIAL_TYPE: &str = "public-key";

/// COSE algorithm identifier for EdDSA (Ed25519).
pub const COSE_ALG_EDDSA: i32 = -8;

/// Request for creating a new credential (registration ceremony)
///
/// Built from the decoded server options: all binary fields are raw bytes,
/// never transport-encoded.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Challenge issued by the server for this registration attempt
    pub challenge: Vec<u8>,
    /// Relying-party identity the credential will be scoped to
    pub rp: RelyingParty,
    /// User the credential belongs to
    pub user: UserDescriptor,
    /// Accepted credential parameters, in preference order
    pub parameters: Vec<CredentialParameters>,
}

/// Request for asserting an existing credential (login ceremony)
#[derive(Debug, Clone)]
pub struct GetRequest {
    /// Challenge issued by the server for this login attempt
    pub challenge: Vec<u8>,
}

/// Credential minted by a `create` call
///
/// `attestation_object` and `client_data_json` are opaque blobs; they are
/// forwarded to the server without inspection.
#[derive(Debug, Clone)]
pub struct AttestedCredential {
    /// Opaque credential identifier
    pub id: String,
    /// Type tag; the protocol requires "public-key"
    pub ty: String,
    /// Raw credential id bytes
    pub raw_id: Vec<u8>,
    /// Serialized client data (challenge, origin, type)
    pub client_data_json: Vec<u8>,
    /// Attestation statement produced by the authenticator
    pub attestation_object: Vec<u8>,
}

/// Assertion produced by a `get` call
#[derive(Debug, Clone)]
pub struct Assertion {
    /// Opaque credential identifier
    pub id: String,
    /// Type tag; the protocol requires "public-key"
    pub ty: String,
    /// Raw credential id bytes
    pub raw_id: Vec<u8>,
    /// Serialized client data (challenge, origin, type)
    pub client_data_json: Vec<u8>,
    /// Authenticator data covered by the signature
    pub authenticator_data: Vec<u8>,
    /// Signature over authenticator data and client data hash
    pub signature: Vec<u8>,
    /// User handle, when the authenticator discloses one
    pub user_handle: Option<Vec<u8>>,
}

/// Platform-defined authenticator fault
///
/// The ceremony never interprets the message; it is carried to the caller
/// unchanged inside [`crate::error::CeremonyError::Authenticator`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AuthenticatorError(pub String);

/// Local authenticator capability
///
/// `Ok(None)` means the authenticator declined without fault: user
/// cancellation or platform refusal. The ceremony maps it to
/// [`crate::error::CeremonyError::NoCredential`] and does not contact the
/// server.
#[async_trait]
pub trait Authenticator {
    /// Create a new credential for the given relying party and user
    async fn create(
        &self,
        request: CreateRequest,
    ) -> Result<Option<AttestedCredential>, AuthenticatorError>;

    /// Assert an existing credential against the given challenge
    async fn get(&self, request: GetRequest) -> Result<Option<Assertion>, AuthenticatorError>;
}
