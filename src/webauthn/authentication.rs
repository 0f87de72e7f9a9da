//! # Login Ceremony
//!
//! Client-side orchestration of the two-phase login exchange.
//!
//! ## Flow
//! 1. **Begin**: fetch login options; the transport returns the challenge
//!    decoded to raw bytes
//! 2. **Get**: ask the local authenticator to assert a credential against
//!    the challenge
//! 3. **Finish**: transport-encode the assertion's binary members and submit
//!    them together with the correlation token
//!
//! The correlation token is the begin-login challenge re-encoded from this
//! ceremony's own decoded copy. The server uses it to look up the session it
//! issued the challenge under; the cryptographic challenge the authenticator
//! signed travels separately inside the client data. The token proves
//! nothing about freshness.

use crate::authenticator::{Authenticator, GetRequest};
use crate::error::{CeremonyError, CeremonyResult};
use crate::transport::CeremonyTransport;
use crate::webauthn::ceremony::{Ceremony, CeremonyKind, CeremonyState};
use crate::webauthn::types::{AssertionResponse, LoginCredential};

/// Run one login ceremony from begin to finish
///
/// Single-attempt: every failure is terminal and surfaced unchanged.
///
/// ## Errors
/// - `ServerRejected`: a begin or finish exchange answered non-success
/// - `NoCredential`: the authenticator produced no assertion
/// - `Authenticator`: the authenticator capability faulted
pub async fn login<A>(transport: &CeremonyTransport, authenticator: &A) -> CeremonyResult<()>
where
    A: Authenticator + ?Sized,
{
    let mut ceremony = Ceremony::new(CeremonyKind::Login);

    match run(transport, authenticator, &mut ceremony).await {
        Ok(()) => {
            ceremony.advance(CeremonyState::Complete);
            tracing::info!("login ceremony complete");
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
    let options = transport.begin_login().await?;
    tracing::debug!("login options received");

    ceremony.advance(CeremonyState::AwaitingLocalAuthenticator);
    let assertion = authenticator
        .get(GetRequest {
            challenge: options.challenge.clone(),
        })
        .await?
        .ok_or(CeremonyError::NoCredential)?;
    tracing::debug!(credential = %assertion.id, "assertion produced locally");

    // The token is the ORIGINAL decoded challenge re-encoded, never a value
    // derived from the assertion.
    let correlation_token = transport.encode(&options.challenge).await?;

    let user_handle = match assertion.user_handle {
        Some(handle) => Some(transport.encode(&handle).await?),
        None => None,
    };

    let payload = LoginCredential {
        id: assertion.id,
        ty: assertion.ty,
        raw_id: transport.encode(&assertion.raw_id).await?,
        response: AssertionResponse {
            client_data_json: transport.encode(&assertion.client_data_json).await?,
            authenticator_data: transport.encode(&assertion.authenticator_data).await?,
            signature: transport.encode(&assertion.signature).await?,
            user_handle,
        },
    };

    ceremony.advance(CeremonyState::AwaitingServerVerification);
    transport.finish_login(&payload, &correlation_token).await
}
