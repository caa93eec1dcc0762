#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `skygenesis-async`
//!
//! Async client for the Sky Genesis Enterprise API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use skygenesis_async::{Client, types::{ListParams, UserCreateParamsBuilder}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("sk-your-api-key")?;
//!
//! let params = UserCreateParamsBuilder::default()
//!     .email("john.doe@example.com")
//!     .name("John Doe")
//!     .build()?;
//! let user = client.users().create(&params).await?;
//!
//! let page = client.users().list(&ListParams::new().with_limit(5)).await?;
//! println!("{} of {:?} users", page.data.len(), page.total);
//! # let _ = user;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`SkyGenesisError`]: `Authentication` for 401,
//! `Validation` for 400 (with the offending `param`), and `Api` for anything
//! else. `Api` errors with status code 0 mean no response was received, or
//! the request could not be built.
//!
//! ## Retries
//!
//! Only network failures are retried, up to
//! [`SkyGenesisConfig::with_max_network_retries`] times (default 2).

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// Request verbs and per-request options
pub mod request;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{Config, SkyGenesisConfig};
pub use crate::error::{ErrorKind, SkyGenesisError};
pub use crate::request::{RequestOptions, Verb};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, ErrorKind, RequestOptions, SkyGenesisConfig, SkyGenesisError, Verb};
}
