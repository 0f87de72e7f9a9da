//! # Ceremony Wire and Domain Types
//!
//! This module defines the structures exchanged with the ceremony server.
//! Field names on the wire follow WebAuthn's camelCase convention
//! (`rawId`, `clientDataJSON`, ...), mapped with explicit serde renames.
//!
//! ## Two Layers
//! - Wire types (`Wire*`, crate-private): exactly what the server sends in a
//!   begin response. Binary fields are still transport-encoded strings.
//! - Domain types (`RegistrationOptions`, `LoginOptions`): what the
//!   transport returns after decoding, with binary fields as raw bytes.
//!
//! Finish payloads go the other direction: their binary members are already
//! transport-encoded strings by the time they are constructed.

use serde::{Deserialize, Serialize};

/// Relying-party identity, as issued by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelyingParty {
    /// Human-readable service name
    pub name: String,
    /// RP identifier (the service's domain)
    pub id: String,
}

/// Accepted credential type/algorithm pair
///
/// ## Example JSON
/// ```json
/// { "type": "public-key", "alg": -8 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialParameters {
    #[serde(rename = "type")]
    pub ty: String,
    /// COSE algorithm identifier (negative for asymmetric algorithms)
    pub alg: i32,
}

/// User descriptor with the id decoded to raw bytes
#[derive(Debug, Clone)]
pub struct UserDescriptor {
    /// Server-assigned user id bytes
    pub id: Vec<u8>,
    /// Account name
    pub name: String,
    /// Human-readable name shown during credential creation
    pub display_name: String,
}

/// Server options for a registration ceremony, fully decoded
///
/// Consumed once by the ceremony that requested it and then discarded.
#[derive(Debug)]
pub struct RegistrationOptions {
    pub rp: RelyingParty,
    pub user: UserDescriptor,
    /// Challenge bytes for this registration attempt
    pub challenge: Vec<u8>,
    /// Algorithms the server accepts, as sent
    pub algorithms: Vec<CredentialParameters>,
}

/// Server options for a login ceremony, fully decoded
#[derive(Debug)]
pub struct LoginOptions {
    /// Challenge bytes for this login attempt
    pub challenge: Vec<u8>,
}

// Wire-side structures below: the shapes actually read from begin responses.

/// `{"publicKey": {...}}` envelope wrapping both begin responses
#[derive(Debug, Deserialize)]
pub(crate) struct PublicKeyEnvelope<T> {
    #[serde(rename = "publicKey")]
    pub public_key: T,
}

/// Registration options as received: challenge and user.id still encoded
#[derive(Debug, Deserialize)]
pub(crate) struct WireRegistrationOptions {
    pub rp: RelyingParty,
    pub user: WireUser,
    pub challenge: String,
    #[serde(rename = "pubKeyCredParams", default)]
    pub pub_key_cred_params: Vec<CredentialParameters>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: String,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Login options as received: challenge still encoded
#[derive(Debug, Deserialize)]
pub(crate) struct WireLoginOptions {
    pub challenge: String,
}

/// Finish payload for a registration ceremony
///
/// All binary members are transport-encoded before this is built; the
/// transport serializes it as-is.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationCredential {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    pub response: AttestationResponse,
}

/// Registration response member: attestation + client data
#[derive(Debug, Serialize, Deserialize)]
pub struct AttestationResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    #[serde(rename = "attestationObject")]
    pub attestation_object: String,
}

/// Finish payload for a login ceremony
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginCredential {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    pub response: AssertionResponse,
}

/// Login response member: assertion data, signature, optional user handle
///
/// `userHandle` is left out of the JSON entirely when the authenticator did
/// not disclose one.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String,
    pub signature: String,
    #[serde(rename = "userHandle", skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}
