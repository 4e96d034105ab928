//! The HTTP boundary.
//!
//! The client describes each round trip as an [`HttpRequest`] and hands it to
//! a [`Transport`]. [`HttpsTransport`] is the production implementation on top
//! of `reqwest`; tests substitute their own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(Vec<(String, String)>),
}

/// PEM certificate and private key presented for mutual TLS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientCertificate {
    pub certificate_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
    pub client_certificate: Option<ClientCertificate>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The status line as reported to callers, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        match StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

/// A failure below HTTP: connection refused, TLS setup, timeout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError("Request timed out".to_string());
        }
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        TransportError(message)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport. One pooled client serves plain requests and a
/// separate client is built, then cached, per client certificate.
pub struct HttpsTransport {
    client: Client,
    identities: Mutex<HashMap<ClientCertificate, Client>>,
}

impl HttpsTransport {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            client: Self::builder().build()?,
            identities: Mutex::new(HashMap::new()),
        })
    }

    fn builder() -> ClientBuilder {
        Client::builder().gzip(true)
    }

    fn client_for(&self, certificate: Option<&ClientCertificate>) -> Result<Client, TransportError> {
        let Some(certificate) = certificate else {
            return Ok(self.client.clone());
        };

        let mut identities = self
            .identities
            .lock()
            .map_err(|_| TransportError("client identity cache poisoned".to_string()))?;
        if let Some(client) = identities.get(certificate) {
            return Ok(client.clone());
        }

        let mut pem = read_pem(&certificate.certificate_path)?;
        pem.push(b'\n');
        pem.extend(read_pem(&certificate.key_path)?);
        let identity = reqwest::Identity::from_pem(&pem)?;
        let client = Self::builder().identity(identity).build()?;

        identities.insert(certificate.clone(), client.clone());
        Ok(client)
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TransportError> {
    fs::read(path).map_err(|err| TransportError(format!("{}: {}", path.display(), err)))
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        // hop-by-hop; the connection pool already keeps sockets alive
        if name.eq_ignore_ascii_case("connection") {
            continue;
        }
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| TransportError(format!("invalid header name {name}: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| TransportError(format!("invalid value for header {name}: {err}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.client_for(request.client_certificate.as_ref())?;
        let headers = header_map(&request.headers)?;

        let builder = match request.method {
            HttpMethod::Get => client.get(&request.url),
            HttpMethod::Post => client.post(&request.url),
        }
        .headers(headers)
        .timeout(request.timeout);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!("HTTP {} {}", status, request.url);

        let body = response.text().await?;
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
