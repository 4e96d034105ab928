//! Error types for the Betfair client.
//!
//! Every failure a client operation can produce is a [`BetfairError`]. Its
//! `Display` output is exactly the message recorded as the client's last
//! error, and [`BetfairError::kind`] tells callers which layer failed.

use thiserror::Error;

/// The layer at which an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Malformed construction parameters: not a mapping, or an unknown key.
    Configuration,
    /// Missing required call parameters, or parameters that are not an object.
    Validation,
    /// No active session, no application key, or no client certificate.
    Precondition,
    /// Connection failure or timeout reported by the transport.
    Transport,
    /// Non-200 status without a recognised application error, or an
    /// undecodable body.
    Http,
    /// A structurally successful response carrying a failure status.
    Application,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetfairError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("No application key set")]
    NoApplicationKey,

    #[error("{0}")]
    Precondition(String),

    #[error("{0}")]
    Transport(String),

    #[error("{status_line}")]
    Http { status: u16, status_line: String },

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Api(String),
}

impl BetfairError {
    pub fn kind(&self) -> Kind {
        match self {
            BetfairError::Config(_) => Kind::Configuration,
            BetfairError::Validation(_) => Kind::Validation,
            BetfairError::NotLoggedIn
            | BetfairError::NoApplicationKey
            | BetfairError::Precondition(_) => Kind::Precondition,
            BetfairError::Transport(_) => Kind::Transport,
            BetfairError::Http { .. } | BetfairError::Decode(_) => Kind::Http,
            BetfairError::Api(_) => Kind::Application,
        }
    }

    /// Builds the `"<status> : <code>"` message used for business-level
    /// failures, dropping the separator when there is no code.
    pub(crate) fn api_status(status: &str, code: Option<&str>) -> Self {
        match code.filter(|c| !c.is_empty()) {
            Some(code) => BetfairError::Api(format!("{status} : {code}")),
            None => BetfairError::Api(status.to_string()),
        }
    }
}

impl From<toml::de::Error> for BetfairError {
    fn from(err: toml::de::Error) -> Self {
        BetfairError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BetfairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_last_error_text() {
        assert_eq!(BetfairError::NotLoggedIn.to_string(), "Not logged in");
        assert_eq!(
            BetfairError::NoApplicationKey.to_string(),
            "No application key set"
        );
        let http = BetfairError::Http {
            status: 503,
            status_line: "503 Service Unavailable".to_string(),
        };
        assert_eq!(http.to_string(), "503 Service Unavailable");
        assert_eq!(http.kind(), Kind::Http);
    }

    #[test]
    fn test_api_status_formatting() {
        assert_eq!(
            BetfairError::api_status("FAILURE", Some("INVALID_ORDER")).to_string(),
            "FAILURE : INVALID_ORDER"
        );
        assert_eq!(
            BetfairError::api_status("FAILURE", Some("")).to_string(),
            "FAILURE"
        );
        assert_eq!(
            BetfairError::api_status("TIMEOUT", None).kind(),
            Kind::Application
        );
    }
}
