//! # Ceremony Transport
//!
//! One HTTP exchange per ceremony phase, plus the binary-encoding service
//! calls. The transport owns no ceremony state: every method is a pure
//! request/response mapping over a base URL.
//!
//! ## Endpoints
//! | Phase | Endpoint | Body |
//! |---|---|---|
//! | begin registration | `register:begin` | none |
//! | finish registration | `register:finish` | credential JSON |
//! | begin login | `login:begin` | none |
//! | finish login | `login:finish?challenge=<token>` | credential JSON |
//! | encode | `base64:encode` | byte values as a JSON array |
//! | decode | `base64:decode` | encoded text |
//!
//! Binary-to-text conversion is delegated to the server in both directions:
//! the server performs the exact transform it will later reverse, so client
//! and server can never disagree on the encoding variant. Each ceremony only
//! makes a handful of these calls.
//!
//! Any non-success response terminates the ceremony with
//! [`CeremonyError::ServerRejected`] carrying the response body text.

use crate::config::Config;
use crate::error::{CeremonyError, CeremonyResult};
use crate::webauthn::types::{
    LoginCredential, LoginOptions, PublicKeyEnvelope, RegistrationCredential,
    RegistrationOptions, UserDescriptor, WireLoginOptions, WireRegistrationOptions,
};
use std::time::Duration;

/// HTTP adapter for the ceremony endpoints
pub struct CeremonyTransport {
    http: reqwest::Client,
    base_url: String,
}

impl CeremonyTransport {
    /// Create a transport for the configured server
    pub fn new(config: &Config) -> CeremonyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(CeremonyTransport {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Map a non-success response to `ServerRejected` with its body text
    async fn check(response: reqwest::Response) -> CeremonyResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CeremonyError::ServerRejected(body))
        }
    }

    /// Begin a registration ceremony
    ///
    /// Returns the server's options with `challenge` and `user.id` decoded
    /// to raw bytes.
    pub async fn begin_registration(&self) -> CeremonyResult<RegistrationOptions> {
        let response = self.http.post(self.url("register:begin")).send().await?;
        let response = Self::check(response).await?;

        let envelope: PublicKeyEnvelope<WireRegistrationOptions> = response.json().await?;
        let wire = envelope.public_key;

        let challenge = self.decode(&wire.challenge).await?;
        let user_id = self.decode(&wire.user.id).await?;

        Ok(RegistrationOptions {
            rp: wire.rp,
            user: UserDescriptor {
                id: user_id,
                name: wire.user.name,
                display_name: wire.user.display_name,
            },
            challenge,
            algorithms: wire.pub_key_cred_params,
        })
    }

    /// Finish a registration ceremony
    ///
    /// `credential`'s binary members must already be transport-encoded.
    /// Success carries no body; the side effect (credential persistence) is
    /// server-internal.
    pub async fn finish_registration(
        &self,
        credential: &RegistrationCredential,
    ) -> CeremonyResult<()> {
        let response = self
            .http
            .post(self.url("register:finish"))
            .json(credential)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Begin a login ceremony
    ///
    /// Returns the server's options with `challenge` decoded to raw bytes.
    pub async fn begin_login(&self) -> CeremonyResult<LoginOptions> {
        let response = self.http.post(self.url("login:begin")).send().await?;
        let response = Self::check(response).await?;

        let envelope: PublicKeyEnvelope<WireLoginOptions> = response.json().await?;
        let challenge = self.decode(&envelope.public_key.challenge).await?;

        Ok(LoginOptions { challenge })
    }

    /// Finish a login ceremony
    ///
    /// `correlation_token` is the encoded begin-login challenge, sent as the
    /// `challenge` query parameter so the server can look up the session it
    /// issued the challenge under. It is a lookup key only; the server must
    /// not treat it as proof of freshness.
    pub async fn finish_login(
        &self,
        credential: &LoginCredential,
        correlation_token: &str,
    ) -> CeremonyResult<()> {
        let response = self
            .http
            .post(self.url("login:finish"))
            .query(&[("challenge", correlation_token)])
            .json(credential)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Encode bytes into their transport representation
    ///
    /// The bytes travel as a JSON array of integers 0-255; the response body
    /// is the encoded text, unwrapped.
    pub async fn encode(&self, bytes: &[u8]) -> CeremonyResult<String> {
        let body = serde_json::to_string(bytes)?;
        let response = self
            .http
            .post(self.url("base64:encode"))
            .body(body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.text().await?)
    }

    /// Decode transport-encoded text back into bytes
    ///
    /// Inverse of [`encode`](Self::encode): the encoded text is the raw
    /// request body, the response is a JSON array of integers 0-255.
    pub async fn decode(&self, encoded: &str) -> CeremonyResult<Vec<u8>> {
        let response = self
            .http
            .post(self.url("base64:decode"))
            .body(encoded.to_string())
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}
