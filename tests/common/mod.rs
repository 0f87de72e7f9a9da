//! Test harness: an in-process ceremony server and a scripted authenticator.
//!
//! The server implements the same six endpoints the real relying party
//! exposes, including the `base64url` (no padding) transform for the
//! encode/decode service, plus per-endpoint failure injection and request
//! recording so tests can assert on exactly what reached the server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use base64::prelude::*;

use passkey_client::authenticator::{
    Assertion, AttestedCredential, Authenticator, AuthenticatorError, CreateRequest, GetRequest,
};
use passkey_client::{CeremonyTransport, Config};

/// Scenario values served by the test server.
#[derive(Clone)]
pub struct ServerConfig {
    pub rp_name: String,
    pub rp_id: String,
    pub user_id: Vec<u8>,
    pub user_name: String,
    pub user_display_name: String,
    pub registration_challenge: Vec<u8>,
    pub login_challenge: Vec<u8>,
    /// Endpoint to fail, with status and body ("register:begin", ...)
    pub reject: Option<(&'static str, u16, String)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            rp_name: "R".into(),
            rp_id: "r".into(),
            user_id: vec![9, 9],
            user_name: "a".into(),
            user_display_name: "A".into(),
            registration_challenge: vec![1, 2, 3],
            login_challenge: vec![7, 7],
            reject: None,
        }
    }
}

/// What the finish endpoints received.
#[derive(Default)]
pub struct Recorded {
    pub register_finish: Option<serde_json::Value>,
    pub login_finish: Option<serde_json::Value>,
    pub login_finish_token: Option<String>,
}

struct ServerState {
    config: ServerConfig,
    recorded: Mutex<Recorded>,
}

impl ServerState {
    fn rejection(&self, endpoint: &str) -> Option<(StatusCode, String)> {
        match &self.config.reject {
            Some((e, status, body)) if *e == endpoint => Some((
                StatusCode::from_u16(*status).expect("valid status code"),
                body.clone(),
            )),
            _ => None,
        }
    }
}

/// Handle to a running in-process ceremony server.
pub struct CeremonyServer {
    pub base_url: String,
    state: Arc<ServerState>,
}

impl CeremonyServer {
    /// Spawn a server with the given scenario values.
    pub async fn spawn(config: ServerConfig) -> Self {
        // Best-effort tracing for test diagnostics (RUST_LOG controls it)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let state = Arc::new(ServerState {
            config,
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/webauthn/register:begin", post(register_begin))
            .route("/webauthn/register:finish", post(register_finish))
            .route("/webauthn/login:begin", post(login_begin))
            .route("/webauthn/login:finish", post(login_finish))
            .route("/webauthn/base64:encode", post(base64_encode))
            .route("/webauthn/base64:decode", post(base64_decode))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        CeremonyServer {
            base_url: format!("http://{addr}/webauthn"),
            state,
        }
    }

    pub async fn spawn_default() -> Self {
        Self::spawn(ServerConfig::default()).await
    }

    /// Transport pointed at this server.
    pub fn transport(&self) -> CeremonyTransport {
        CeremonyTransport::new(&Config::new(&self.base_url)).expect("build transport")
    }

    /// The server-side transport encoding of `bytes` (for assertions).
    pub fn encoded(&self, bytes: &[u8]) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn register_finish_body(&self) -> Option<serde_json::Value> {
        self.state.recorded.lock().unwrap().register_finish.clone()
    }

    pub fn login_finish_body(&self) -> Option<serde_json::Value> {
        self.state.recorded.lock().unwrap().login_finish.clone()
    }

    pub fn login_finish_token(&self) -> Option<String> {
        self.state
            .recorded
            .lock()
            .unwrap()
            .login_finish_token
            .clone()
    }
}

async fn register_begin(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if let Some(rejection) = state.rejection("register:begin") {
        return Err(rejection);
    }
    let config = &state.config;
    Ok(Json(serde_json::json!({
        "publicKey": {
            "rp": {"name": config.rp_name, "id": config.rp_id},
            "user": {
                "id": BASE64_URL_SAFE_NO_PAD.encode(&config.user_id),
                "name": config.user_name,
                "displayName": config.user_display_name,
            },
            "challenge": BASE64_URL_SAFE_NO_PAD.encode(&config.registration_challenge),
            "pubKeyCredParams": [
                {"type": "public-key", "alg": -8},
                {"type": "public-key", "alg": -7},
            ],
        }
    })))
}

async fn register_finish(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.recorded.lock().unwrap().register_finish = Some(body);
    if let Some(rejection) = state.rejection("register:finish") {
        return Err(rejection);
    }
    Ok(StatusCode::OK)
}

async fn login_begin(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if let Some(rejection) = state.rejection("login:begin") {
        return Err(rejection);
    }
    Ok(Json(serde_json::json!({
        "publicKey": {
            "challenge": BASE64_URL_SAFE_NO_PAD.encode(&state.config.login_challenge),
        }
    })))
}

async fn login_finish(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.login_finish = Some(body);
        recorded.login_finish_token = params.get("challenge").cloned();
    }
    if let Some(rejection) = state.rejection("login:finish") {
        return Err(rejection);
    }
    Ok(StatusCode::OK)
}

// [1,2,3] => "AQID", same transform and body shapes as the real server
async fn base64_encode(body: String) -> Result<String, (StatusCode, String)> {
    let bytes: Vec<u8> = serde_json::from_str(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(bytes))
}

// "AQID" => [1,2,3]
async fn base64_decode(body: String) -> Result<Json<Vec<u8>>, (StatusCode, String)> {
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(body.as_bytes())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(bytes))
}

/// Scripted outcome for the mock authenticator.
pub enum MockBehavior {
    Create(AttestedCredential),
    Assert(Assertion),
    /// User dismissed the prompt: no credential, no fault
    Decline,
    /// Platform fault with the given message
    Fail(String),
}

/// Authenticator double that records the requests it receives.
pub struct MockAuthenticator {
    behavior: MockBehavior,
    pub last_create: Mutex<Option<CreateRequest>>,
    pub last_get: Mutex<Option<GetRequest>>,
}

impl MockAuthenticator {
    pub fn new(behavior: MockBehavior) -> Self {
        MockAuthenticator {
            behavior,
            last_create: Mutex::new(None),
            last_get: Mutex::new(None),
        }
    }

    pub fn creating(credential: AttestedCredential) -> Self {
        Self::new(MockBehavior::Create(credential))
    }

    pub fn asserting(assertion: Assertion) -> Self {
        Self::new(MockBehavior::Assert(assertion))
    }

    pub fn declining() -> Self {
        Self::new(MockBehavior::Decline)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockBehavior::Fail(message.to_string()))
    }

    pub fn create_request(&self) -> Option<CreateRequest> {
        self.last_create.lock().unwrap().clone()
    }

    pub fn get_request(&self) -> Option<GetRequest> {
        self.last_get.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn create(
        &self,
        request: CreateRequest,
    ) -> Result<Option<AttestedCredential>, AuthenticatorError> {
        *self.last_create.lock().unwrap() = Some(request);
        match &self.behavior {
            MockBehavior::Create(credential) => Ok(Some(credential.clone())),
            MockBehavior::Decline => Ok(None),
            MockBehavior::Fail(message) => Err(AuthenticatorError(message.clone())),
            MockBehavior::Assert(_) => panic!("create called on an asserting mock"),
        }
    }

    async fn get(&self, request: GetRequest) -> Result<Option<Assertion>, AuthenticatorError> {
        *self.last_get.lock().unwrap() = Some(request);
        match &self.behavior {
            MockBehavior::Assert(assertion) => Ok(Some(assertion.clone())),
            MockBehavior::Decline => Ok(None),
            MockBehavior::Fail(message) => Err(AuthenticatorError(message.clone())),
            MockBehavior::Create(_) => panic!("get called on a creating mock"),
        }
    }
}

/// Credential matching the registration happy-path scenario.
pub fn sample_credential() -> AttestedCredential {
    AttestedCredential {
        id: "cred-1".into(),
        ty: "public-key".into(),
        raw_id: vec![4, 5],
        client_data_json: br#"{"type":"webauthn.create"}"#.to_vec(),
        attestation_object: vec![0xa3, 0x63, 0x66, 0x6d, 0x74],
    }
}

/// Assertion with a user handle present.
pub fn sample_assertion() -> Assertion {
    Assertion {
        id: "cred-1".into(),
        ty: "public-key".into(),
        raw_id: vec![4, 5],
        client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
        authenticator_data: vec![0x49, 0x96, 0x02, 0xd2],
        signature: vec![0x30, 0x45, 0x02, 0x21],
        user_handle: Some(vec![9, 9]),
    }
}
