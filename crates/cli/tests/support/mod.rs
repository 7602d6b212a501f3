//! Scripted transport and client harness shared by the CLI tests

#![allow(dead_code)]

use licport_cli::http::{HttpClient, OutgoingRequest, RawResponse, Transport, TransportError};
use licport_cli::nav::Navigator;
use licport_cli::session::SessionStore;
use licport_core::{PortalConfig, Route};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BASE_URL: &str = "https://api.test";

#[derive(Default)]
struct Inner {
    replies: VecDeque<Result<RawResponse, TransportError>>,
    seen: Vec<OutgoingRequest>,
}

/// Answers requests from a queue and records what was sent.
#[derive(Clone, Default)]
pub struct Script {
    inner: Rc<RefCell<Inner>>,
}

impl Script {
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.inner
            .borrow_mut()
            .replies
            .push_back(Ok(RawResponse { status, body }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.inner
            .borrow_mut()
            .replies
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.inner.borrow().seen.clone()
    }

    pub fn last(&self) -> OutgoingRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for Script {
    fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        let mut inner = self.inner.borrow_mut();
        inner.seen.push(request.clone());
        inner
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".into())))
    }
}

pub struct Harness {
    pub http: HttpClient,
    pub script: Script,
    pub nav: Navigator,
    pub session: SessionStore,
    pub redirects: Arc<Mutex<Vec<Route>>>,
    _dir: TempDir,
}

impl Harness {
    pub fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().unwrap().clone()
    }
}

pub fn config() -> PortalConfig {
    let mut config = PortalConfig::default();
    config.api.base_url = format!("{}/", BASE_URL);
    config.api.api_key = "test-api-key".into();
    config
}

/// A client over a scripted transport, a throwaway session directory and
/// a navigator at `current` that records every redirect.
pub fn harness(current: Route) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::new(dir.path().join("session"));
    let nav = Navigator::new(current);
    let redirects = Arc::new(Mutex::new(Vec::new()));
    let sink = redirects.clone();
    nav.register(move |r| sink.lock().unwrap().push(r));

    let script = Script::default();
    let http = HttpClient::new(
        &config(),
        Box::new(script.clone()),
        session.clone(),
        nav.clone(),
    );
    Harness {
        http,
        script,
        nav,
        session,
        redirects,
        _dir: dir,
    }
}

pub fn signed_in(current: Route) -> Harness {
    let h = harness(current);
    h.session
        .save(&licport_core::Session {
            access_token: "header.payload.signature".into(),
            refresh_token: None,
        })
        .unwrap();
    h
}
