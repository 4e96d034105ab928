//! # betfair-ng
//!
//! A stateful client for the Betfair Exchange REST API: certificate and
//! interactive login, keep-alive and logout, and a single dispatcher that
//! routes every betting, account, heartbeat, race-status and navigation
//! operation to its host and classifies the outcome.
//!
//! ## Quick Start
//!
//! ```no_run
//! use betfair_ng::{BetfairClient, Config};
//! use betfair_ng::dto::{FilterRequest, MarketFilter};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Load configuration from config.toml
//! let config = Config::new()?;
//!
//! let mut client = BetfairClient::new(config)?;
//! client.login("username", "password").await?;
//!
//! // Soccer competitions
//! let filter = MarketFilter {
//!     event_type_ids: Some(vec!["1".to_string()]),
//!     ..Default::default()
//! };
//! let competitions = client.list_competitions(&FilterRequest::new(filter)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Untyped parameters go through the same validation:
//!
//! ```no_run
//! use betfair_ng::{BetfairClient, Config, Operation};
//! use serde_json::json;
//!
//! # async fn example(client: &mut BetfairClient) -> anyhow::Result<()> {
//! let books = client
//!     .call(Operation::ListMarketBook, json!({ "marketIds": ["1.240634817"] }))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [client]
//! certificate_path = "/path/to/client-2048.crt"
//! key_path = "/path/to/client-2048.key"
//! application_key = "your_app_key"
//!
//! [credentials]
//! username = "your_username"
//! password = "your_password"
//! ```
//!
//! An `[endpoints]` table overrides any of the service URLs.

pub mod api_client;
pub mod classify;
pub mod client;
pub mod config;
pub mod dto;
pub mod endpoint;
pub mod error;
pub mod operation;
pub mod session;
pub mod transport;
pub mod validation;

// Re-export commonly used types at the crate root
pub use client::BetfairClient;
pub use config::{ClientConfig, Config, Credentials};
pub use endpoint::{Endpoints, Service};
pub use error::{BetfairError, Kind, Result};
pub use operation::Operation;
pub use transport::{HttpRequest, HttpResponse, HttpsTransport, Transport, TransportError};
