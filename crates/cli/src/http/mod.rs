//! HTTP client adapter for the portal backend
//!
//! Every call goes through [`HttpClient::send`], which:
//! 1. attaches the static API-key header and, when a session exists, the
//!    bearer token header (both header names come from config)
//! 2. reports the request and response to a [`RequestObserver`]
//! 3. on a 401, clears the stored session and redirects to `/login`
//!    (unless already there)
//! 4. turns non-2xx statuses into [`ApiError::Http`] with the body's
//!    `message`, or a status-table message when there is none
//!
//! There are no retries: a failed call surfaces once.

mod observer;
mod transport;

pub use observer::{mask_secret, RequestObserver, TracingObserver};
pub use transport::ReqwestTransport;

use licport_core::envelope::body_message;
use licport_core::{status_message, PortalConfig, Route};
use serde::Serialize;
use serde_json::Value;

use crate::nav::Navigator;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A fully-resolved request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl OutgoingRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back over the wire, before any status interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// The request never produced a response (refused, DNS, timeout, TLS).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Moves one request over the network.
pub trait Transport {
    fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot connect to server at {url}. Please check if the backend is running and accessible. Error: {message}")]
    Network { url: String, message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request body could not be serialized; nothing was sent.
    #[error("Could not encode the request body: {message}")]
    Encode { message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Encode { .. } => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub struct HttpClient {
    base_url: String,
    api_key_header: String,
    api_key: String,
    token_header: String,
    transport: Box<dyn Transport>,
    observer: Box<dyn RequestObserver>,
    session: SessionStore,
    navigator: Navigator,
}

impl HttpClient {
    pub fn new(
        config: &PortalConfig,
        transport: Box<dyn Transport>,
        session: SessionStore,
        navigator: Navigator,
    ) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            api_key_header: config.api.api_key_header.clone(),
            api_key: config.api.api_key.clone(),
            token_header: config.api.token_header.clone(),
            transport,
            observer: Box::new(TracingObserver),
            session,
            navigator,
        }
    }

    /// Client over the real network.
    pub fn connect(
        config: &PortalConfig,
        session: SessionStore,
        navigator: Navigator,
    ) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config.api.timeout_secs)?;
        Ok(Self::new(config, Box::new(transport), session, navigator))
    }

    pub fn with_observer(mut self, observer: Box<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ApiError> {
        self.send(Method::Get, path, query, None)
    }

    pub fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode {
            message: e.to_string(),
        })?;
        self.send(Method::Post, path, &[], Some(body))
    }

    pub fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build(method, path, query, body);
        self.observer.on_request(&request);

        let response = match self.transport.send(&request) {
            Ok(r) => r,
            Err(e) => {
                self.observer.on_transport_error(&request, &e);
                return Err(ApiError::Network {
                    url: request.url.clone(),
                    message: e.0,
                });
            }
        };
        self.observer.on_response(&request, &response);

        if response.status == 401 {
            self.invalidate_session();
        }

        if !(200..300).contains(&response.status) {
            let message = body_message(&response.body)
                .unwrap_or_else(|| status_message(response.status).to_string());
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        Ok(ApiResponse {
            status: response.status,
            data: response.body,
        })
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> OutgoingRequest {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (self.api_key_header.clone(), self.api_key.clone()),
        ];
        if let Some(token) = self.session.current_token() {
            headers.push((self.token_header.clone(), format!("Bearer {}", token)));
        }
        OutgoingRequest {
            method,
            url: self.url(path),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            headers,
            body,
        }
    }

    /// A 401 from any endpoint ends the session everywhere.
    fn invalidate_session(&self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "could not clear session after 401");
        }
        if self.navigator.redirect_to_login() {
            tracing::info!(to = %Route::Login, "session rejected by backend; redirected");
        }
    }
}
