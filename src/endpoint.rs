//! Service endpoints and the client's active route.
//!
//! A client is always parked on the betting service. Calls that belong to
//! another service enter a [`RouteGuard`], which swaps the active service and
//! its header overrides in and puts the previous route back when dropped.

use crate::operation::Operation;
use crate::transport::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("betfair-ng/", env!("CARGO_PKG_VERSION"));

pub const X_APPLICATION: &str = "X-Application";
pub const X_AUTHENTICATION: &str = "X-Authentication";
pub const CONTENT_TYPE: &str = "Content-Type";

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Betting,
    Account,
    Heartbeat,
    RaceStatus,
    Navigation,
    CertLogin,
    InteractiveLogin,
    Logout,
    KeepAlive,
}

/// Base URLs for every service. Any entry can be overridden from the
/// `[endpoints]` table of `config.toml`, e.g. to point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    pub betting: String,
    pub account: String,
    pub heartbeat: String,
    pub race_status: String,
    pub navigation: String,
    pub cert_login: String,
    pub interactive_login: String,
    pub logout: String,
    pub keep_alive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            betting: "https://api.betfair.com/exchange/betting/rest/v1.0/".to_string(),
            account: "https://api.betfair.com/exchange/account/rest/v1.0/".to_string(),
            heartbeat: "https://api.betfair.com/exchange/heartbeat/rest/v1.0/".to_string(),
            race_status: "https://api.betfair.com/exchange/scores/rest/v1.0/".to_string(),
            navigation: "https://api.betfair.com/exchange/betting/rest/v1/en/navigation/menu.json"
                .to_string(),
            cert_login: "https://identitysso-cert.betfair.com/api/certlogin".to_string(),
            interactive_login: "https://identitysso.betfair.com/api/login".to_string(),
            logout: "https://identitysso.betfair.com/api/logout".to_string(),
            keep_alive: "https://identitysso.betfair.com/api/keepAlive".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every REST service at `base` (e.g. a local mock server) while
    /// keeping the default path layout.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            betting: format!("{base}/exchange/betting/rest/v1.0/"),
            account: format!("{base}/exchange/account/rest/v1.0/"),
            heartbeat: format!("{base}/exchange/heartbeat/rest/v1.0/"),
            race_status: format!("{base}/exchange/scores/rest/v1.0/"),
            navigation: format!("{base}/exchange/betting/rest/v1/en/navigation/menu.json"),
            cert_login: format!("{base}/api/certlogin"),
            interactive_login: format!("{base}/api/login"),
            logout: format!("{base}/api/logout"),
            keep_alive: format!("{base}/api/keepAlive"),
        }
    }

    pub fn url(&self, service: Service) -> &str {
        match service {
            Service::Betting => &self.betting,
            Service::Account => &self.account,
            Service::Heartbeat => &self.heartbeat,
            Service::RaceStatus => &self.race_status,
            Service::Navigation => &self.navigation,
            Service::CertLogin => &self.cert_login,
            Service::InteractiveLogin => &self.interactive_login,
            Service::Logout => &self.logout,
            Service::KeepAlive => &self.keep_alive,
        }
    }
}

/// How to reach one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub service: Service,
    pub url: String,
    pub method: HttpMethod,
    /// Headers layered over the standing set while the service is active.
    pub headers: Vec<(&'static str, &'static str)>,
    pub timeout: Duration,
    pub requires_client_cert: bool,
}

#[derive(Debug, Clone)]
pub struct EndpointRouter {
    endpoints: Endpoints,
}

impl EndpointRouter {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn descriptor(&self, service: Service) -> EndpointDescriptor {
        let (method, timeout, requires_client_cert, headers) = match service {
            Service::Navigation => (HttpMethod::Get, NAVIGATION_TIMEOUT, false, Vec::new()),
            Service::CertLogin => (
                HttpMethod::Post,
                DEFAULT_TIMEOUT,
                true,
                vec![(CONTENT_TYPE, FORM_URLENCODED)],
            ),
            Service::InteractiveLogin => (
                HttpMethod::Post,
                DEFAULT_TIMEOUT,
                false,
                vec![(CONTENT_TYPE, FORM_URLENCODED)],
            ),
            _ => (HttpMethod::Post, DEFAULT_TIMEOUT, false, Vec::new()),
        };

        EndpointDescriptor {
            service,
            url: self.endpoints.url(service).to_string(),
            method,
            headers,
            timeout,
            requires_client_cert,
        }
    }

    /// Full URL for an API operation. REST services address operations as
    /// `<base><operationName>/`; the navigation menu is a single document.
    pub fn url_for(&self, operation: Operation) -> String {
        let service = operation.spec().service;
        let base = self.endpoints.url(service);
        match service {
            Service::Navigation => base.to_string(),
            _ => format!("{}/{}/", base.trim_end_matches('/'), operation.name()),
        }
    }
}

/// The service a client currently targets plus the headers it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    service: Service,
    headers: BTreeMap<String, String>,
}

impl Route {
    /// The betting route with the standing header set and no credentials.
    pub fn standing() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), APPLICATION_JSON.to_string());
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        headers.insert("Connection".to_string(), "Keep-Alive".to_string());
        headers.insert("Accept-Encoding".to_string(), "gzip".to_string());
        headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        Self {
            service: Service::Betting,
            headers,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Sets `name` to `value`, or removes it when `value` is empty.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.headers.remove(name);
        } else {
            self.headers.insert(name.to_string(), value.to_string());
        }
    }

    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::standing()
    }
}

/// Scoped switch to another service. Restores the route that was active
/// before [`RouteGuard::enter`] when dropped, on every exit path.
pub struct RouteGuard<'a> {
    route: &'a mut Route,
    saved: Option<Route>,
}

impl<'a> RouteGuard<'a> {
    pub fn enter(route: &'a mut Route, descriptor: &EndpointDescriptor) -> Self {
        let saved = route.clone();
        route.service = descriptor.service;
        for (name, value) in &descriptor.headers {
            route.set_header(name, value);
        }
        Self {
            route,
            saved: Some(saved),
        }
    }
}

impl Deref for RouteGuard<'_> {
    type Target = Route;

    fn deref(&self) -> &Route {
        self.route
    }
}

impl DerefMut for RouteGuard<'_> {
    fn deref_mut(&mut self) -> &mut Route {
        self.route
    }
}

impl Drop for RouteGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            *self.route = saved;
        }
    }
}
