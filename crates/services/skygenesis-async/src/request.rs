//! Request descriptor pieces: the verb set and per-request transport overrides.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::SkyGenesisError;

/// HTTP verbs accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Whether a payload for this verb goes in the JSON body.
    ///
    /// `GET` and `DELETE` send their payload as query parameters instead.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Verb> for Method {
    fn from(v: Verb) -> Self {
        match v {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Patch => Self::PATCH,
            Verb::Delete => Self::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport overrides for a single request
///
/// Headers set here replace client defaults of the same name, and `timeout`
/// replaces the configured timeout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Adds a header, replacing any earlier value for the same name
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Overrides the timeout for this request
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the timeout override, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Merges these header overrides into `base`
    ///
    /// # Errors
    ///
    /// Returns a request error if a header name or value is not valid HTTP.
    pub fn apply_headers(&self, base: &mut HeaderMap) -> Result<(), SkyGenesisError> {
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SkyGenesisError::request(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SkyGenesisError::request(format!("invalid value for {name}: {e}")))?;
            base.insert(name, value);
        }
        Ok(())
    }
}
