#![allow(dead_code)]

use async_trait::async_trait;
use betfair_ng::config::ClientConfig;
use betfair_ng::{BetfairClient, Endpoints, HttpRequest, HttpResponse, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const APP_KEY: &str = "app-key";
pub const SESSION_TOKEN: &str = "session-token";

/// Records every request and answers from a queue of canned outcomes.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no response queued".to_string())))
    }
}

pub fn settings(application_key: &str, session_token: &str) -> ClientConfig {
    ClientConfig {
        certificate_path: "client.crt".to_string(),
        key_path: "client.key".to_string(),
        application_key: application_key.to_string(),
        session_token: session_token.to_string(),
    }
}

pub fn client(settings: ClientConfig, transport: StubTransport) -> BetfairClient<StubTransport> {
    BetfairClient::with_transport(settings, Endpoints::default(), transport)
}

pub fn logged_in(transport: StubTransport) -> BetfairClient<StubTransport> {
    client(settings(APP_KEY, SESSION_TOKEN), transport)
}

pub fn logged_out(transport: StubTransport) -> BetfairClient<StubTransport> {
    client(settings(APP_KEY, ""), transport)
}
