//! # Registration Ceremony
//!
//! Client-side orchestration of the two-phase registration exchange.
//!
//! ## Flow
//! 1. **Begin**: fetch registration options; the transport returns them with
//!    `challenge` and `user.id` already decoded to raw bytes
//! 2. **Create**: ask the local authenticator for a new credential, offering
//!    a single credential parameter: EdDSA (Ed25519, COSE `-8`)
//! 3. **Finish**: transport-encode every binary member of the credential and
//!    submit it for server-side verification and persistence
//!
//! The authenticator declining (no credential) ends the ceremony without any
//! further server contact.

use crate::authenticator::{
    Authenticator, CreateRequest, COSE_ALG_EDDSA, PUBLIC_KEY_CREDENTIAL_TYPE,
};
use crate::error::{CeremonyError, CeremonyResult};
use crate::transport::CeremonyTransport;
use crate::webauthn::ceremony::{Ceremony, CeremonyKind, CeremonyState};
use crate::webauthn::types::{AttestationResponse, CredentialParameters, RegistrationCredential};

/// Run one registration ceremony from begin to finish
///
/// Single-attempt: every failure is terminal and surfaced unchanged.
///
/// ## Errors
/// - `ServerRejected`: a begin or finish exchange answered non-success
/// - `NoCredential`: the authenticator declined to create a credential
/// - `Authenticator`: the authenticator capability faulted
pub async fn register<A>(
    transport: &CeremonyTransport,
    authenticator: &A,
) -> CeremonyResult<()>
where
    A: Authenticator + ?Sized,
{
    let mut ceremony = Ceremony::new(CeremonyKind::Registration);

    match run(transport, authenticator, &mut ceremony).await {
        Ok(()) => {
            ceremony.advance(CeremonyState::Complete);
            tracing::info!("registration ceremony complete");
            Ok(())
        }
        Err(e) => {
            ceremony.fail();
            Err(e)
        }
    }
}

async fn run<A>(
    transport: &CeremonyTransport,
    authenticator: &A,
    ceremony: &mut Ceremony,
) -> CeremonyResult<()>
where
    A: Authenticator + ?Sized,
{
    ceremony.advance(CeremonyState::AwaitingServerChallenge);
    let options = transport.begin_registration().await?;
    tracing::debug!(
        rp = %options.rp.id,
        user = %options.user.name,
        server_algorithms = ?options.algorithms,
        "registration options received"
    );

    // The create request offers exactly one credential parameter: Ed25519.
    // The server's accepted-algorithm list is logged above but not widened.
    let request = CreateRequest {
        challenge: options.challenge,
        rp: options.rp,
        user: options.user,
        parameters: vec![CredentialParameters {
            ty: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
            alg: COSE_ALG_EDDSA,
        }],
    };

    ceremony.advance(CeremonyState::AwaitingLocalAuthenticator);
    let credential = authenticator
        .create(request)
        .await?
        .ok_or(CeremonyError::NoCredential)?;
    tracing::debug!(credential = %credential.id, "credential created locally");

    // Encode every binary member before it crosses the text transport.
    let payload = RegistrationCredential {
        id: credential.id,
        ty: credential.ty,
        raw_id: transport.encode(&credential.raw_id).await?,
        response: AttestationResponse {
            client_data_json: transport.encode(&credential.client_data_json).await?,
            attestation_object: transport.encode(&credential.attestation_object).await?,
        },
    };

    ceremony.advance(CeremonyState::AwaitingServerVerification);
    transport.finish_registration(&payload).await
}
