//! The stateful client and its request dispatcher.
//!
//! Every API operation funnels through [`BetfairClient::call`]: session and
//! application-key preconditions, parameter validation, routing to the
//! operation's service, one transport round trip, then classification of the
//! response. Successful bodies and diagnostic fault bodies are kept as the
//! last response; failure messages are kept as the last error.

use crate::classify;
use crate::config::{ClientConfig, Config};
use crate::endpoint::{
    EndpointRouter, Endpoints, Route, RouteGuard, Service, X_APPLICATION, X_AUTHENTICATION,
};
use crate::error::{BetfairError, Result};
use crate::operation::Operation;
use crate::transport::{HttpMethod, HttpRequest, HttpsTransport, RequestBody, Transport};
use crate::validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const NO_ERROR: &str = "OK";

/// Client for the Betfair Exchange REST API.
///
/// One request is in flight at a time: every operation takes `&mut self`.
/// Use separate clients, each with its own session, for concurrent work.
pub struct BetfairClient<T: Transport = HttpsTransport> {
    pub(crate) transport: T,
    pub(crate) router: EndpointRouter,
    pub(crate) settings: ClientConfig,
    pub(crate) route: Route,
    pub(crate) last_response: Option<Value>,
    pub(crate) last_error: String,
}

impl BetfairClient<HttpsTransport> {
    /// Create a client with the `reqwest` transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport =
            HttpsTransport::new().map_err(|err| BetfairError::Config(err.to_string()))?;
        Ok(Self::with_transport(config.client, config.endpoints, transport))
    }
}

impl<T: Transport> BetfairClient<T> {
    pub fn with_transport(settings: ClientConfig, endpoints: Endpoints, transport: T) -> Self {
        let mut route = Route::standing();
        route.set_header(X_APPLICATION, &settings.application_key);
        route.set_header(X_AUTHENTICATION, &settings.session_token);

        Self {
            transport,
            router: EndpointRouter::new(endpoints),
            settings,
            route,
            last_response: None,
            last_error: NO_ERROR.to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &Endpoints {
        self.router.endpoints()
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn application_key(&self) -> &str {
        &self.settings.application_key
    }

    /// Also sets (or, for an empty key, removes) the `X-Application` header.
    pub fn set_application_key(&mut self, key: impl Into<String>) {
        self.settings.application_key = key.into();
        self.route
            .set_header(X_APPLICATION, &self.settings.application_key);
    }

    pub fn session_token(&self) -> &str {
        &self.settings.session_token
    }

    /// Also sets (or, for an empty token, removes) the `X-Authentication` header.
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.settings.session_token = token.into();
        self.route
            .set_header(X_AUTHENTICATION, &self.settings.session_token);
    }

    pub fn certificate_path(&self) -> &str {
        &self.settings.certificate_path
    }

    pub fn set_certificate_path(&mut self, path: impl Into<String>) {
        self.settings.certificate_path = path.into();
    }

    pub fn key_path(&self) -> &str {
        &self.settings.key_path
    }

    pub fn set_key_path(&mut self, path: impl Into<String>) {
        self.settings.key_path = path.into();
    }

    pub fn is_logged_in(&self) -> bool {
        !self.settings.session_token.is_empty()
    }

    // ========================================================================
    // Response state
    // ========================================================================

    /// Message of the most recent failure, `"OK"` until the first one.
    /// Not cleared by later successful calls.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Decoded body of the most recent response that could be decoded.
    pub fn last_response(&self) -> Option<&Value> {
        self.last_response.as_ref()
    }

    /// The service the client is currently pointed at. Between calls this is
    /// always [`Service::Betting`].
    pub fn active_service(&self) -> Service {
        self.route.service()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        self.route.headers()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Invoke `operation` with untyped parameters and return the decoded body.
    pub async fn call(&mut self, operation: Operation, params: Value) -> Result<Value> {
        match self.dispatch(operation, params).await {
            Ok(body) => Ok(body),
            Err(err) => self.fail(err),
        }
    }

    /// Invoke `operation` with a typed request and decode the typed result.
    pub(crate) async fn invoke<P, R>(&mut self, operation: Operation, params: &P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = match serde_json::to_value(params) {
            Ok(params) => params,
            Err(err) => return self.fail(BetfairError::Validation(err.to_string())),
        };
        let body = self.call(operation, params).await?;
        serde_json::from_value(body).or_else(|err| {
            self.fail(BetfairError::Decode(format!(
                "Unexpected {operation} response: {err}"
            )))
        })
    }

    async fn dispatch(&mut self, operation: Operation, params: Value) -> Result<Value> {
        let spec = operation.spec();
        if !self.is_logged_in() {
            return Err(BetfairError::NotLoggedIn);
        }
        if spec.requires_app_key && self.settings.application_key.is_empty() {
            return Err(BetfairError::NoApplicationKey);
        }
        validation::validate(operation, &params)?;

        let descriptor = self.router.descriptor(spec.service);
        let body = match descriptor.method {
            HttpMethod::Get => RequestBody::Empty,
            HttpMethod::Post => RequestBody::Json(params.to_string()),
        };
        let url = self.router.url_for(operation);
        debug!("API request {}: {}", url, params);

        let route = RouteGuard::enter(&mut self.route, &descriptor);
        let request = HttpRequest {
            method: descriptor.method,
            url,
            headers: route.header_pairs(),
            body,
            timeout: descriptor.timeout,
            client_certificate: None,
        };
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|err| BetfairError::Transport(err.0))?;
        drop(route);

        debug!("API response {}: {}", response.status, response.body);
        let classified = classify::classify(&response, spec.checks_status);
        if let Some(body) = classified.body {
            self.last_response = Some(body);
        }
        classified.outcome
    }

    pub(crate) fn fail<V>(&mut self, err: BetfairError) -> Result<V> {
        warn!("Betfair call failed: {}", err);
        self.last_error = err.to_string();
        Err(err)
    }
}
