//! # Passkey Ceremony Client
//!
//! Client-side orchestration of WebAuthn/Passkey ceremonies against a
//! relying-party server. The server issues challenges and verifies results;
//! a local authenticator creates and uses the actual credentials. This crate
//! is the glue in between: it drives the two-phase begin/finish exchange for
//! registration and for login, converts binary fields to and from their
//! transport encoding, and correlates the login challenge back to the
//! server's session state.
//!
//! ## Key Concepts
//! - **Ceremony**: one complete registration or login run between client,
//!   server, and local authenticator
//! - **Relying party**: the server requesting authentication
//! - **Authenticator**: platform or roaming device that holds the keys
//!
//! This crate never inspects signatures or attestation statements; binary
//! payloads are shuttled as opaque blobs.

// Module declarations - organize code into logical components
pub mod authenticator; // Local authenticator contract (create/get capability)
pub mod config;        // Configuration management (environment variables)
pub mod error;         // Error handling and custom error types
pub mod transport;     // HTTP exchanges with the ceremony server
pub mod webauthn;      // Ceremony orchestration (registration, login)

pub use authenticator::Authenticator;
pub use config::Config;
pub use error::{CeremonyError, CeremonyResult};
pub use transport::CeremonyTransport;
pub use webauthn::WebAuthnClient;
