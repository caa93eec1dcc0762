use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::request::Verb;

/// Message used when a request was sent but no response came back
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: No response received from API";

const DEFAULT_AUTH_MESSAGE: &str = "Authentication failed";
const DEFAULT_VALIDATION_MESSAGE: &str = "Invalid request parameters";
const DEFAULT_API_MESSAGE: &str = "API request failed";

/// Discriminant of a [`SkyGenesisError`], for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API key was missing or rejected (HTTP 401)
    Authentication,
    /// The request parameters were rejected (HTTP 400)
    Validation,
    /// Any other failure, including network and request-construction errors
    Api,
}

/// Errors that can occur when using the Sky Genesis API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkyGenesisError {
    /// Missing API key, or the API answered 401
    #[error("{message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// The API answered 400
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
        /// Offending request field, when the server names one
        param: Option<String>,
    },

    /// Any other HTTP status, or a failure before a response was received.
    ///
    /// `status_code` is 0 when no response exists.
    #[error("{message} (status {status_code})")]
    Api {
        /// Human-readable error message
        message: String,
        /// HTTP status code, or 0 for network/request errors
        status_code: u16,
    },
}

impl SkyGenesisError {
    /// Creates an authentication error
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Error for a request that was dispatched but never answered
    #[must_use]
    pub fn network() -> Self {
        Self::Api {
            message: NETWORK_ERROR_MESSAGE.into(),
            status_code: 0,
        }
    }

    /// Error for a request that could not be built or sent
    #[must_use]
    pub fn request(cause: impl std::fmt::Display) -> Self {
        Self::Api {
            message: format!("Request error: {cause}"),
            status_code: 0,
        }
    }

    /// Returns the kind discriminant
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    /// Returns the human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message }
            | Self::Validation { message, .. }
            | Self::Api { message, .. } => message,
        }
    }

    /// Returns the error type tag (`authentication_error`, `validation_error`, `api_error`)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication_error",
            Self::Validation { .. } => "validation_error",
            Self::Api { .. } => "api_error",
        }
    }

    /// Returns the machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "auth_failed",
            Self::Validation { .. } => "invalid_request",
            Self::Api { .. } => "api_error",
        }
    }

    /// Returns the offending parameter for validation errors
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Validation { param, .. } => param.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code for API errors (0 when no response was received)
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Determines if this error is retryable
    ///
    /// True for network failures (no response received). HTTP errors and
    /// request-construction errors are final. The client additionally resends
    /// a `POST`/`PUT`/`PATCH` only when its connection never opened.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api { status_code: 0, message } if message == NETWORK_ERROR_MESSAGE)
    }
}

/// Classifies a transport error that happened before a full response was read
#[must_use]
pub fn classify_transport(e: &reqwest::Error) -> SkyGenesisError {
    if e.is_builder() {
        return SkyGenesisError::request(e);
    }
    SkyGenesisError::network()
}

/// Whether a transport failure can be sent again without risking a duplicate write
///
/// Only network failures qualify. Verbs without a body are always safe to
/// resend; `POST`/`PUT`/`PATCH` only when the connection never opened, since
/// after that the server may already have applied the write.
#[must_use]
pub fn is_replay_safe(verb: Verb, e: &reqwest::Error) -> bool {
    if e.is_builder() {
        return false;
    }
    !verb.carries_body() || e.is_connect()
}

/// Maps a serde deserialization error on a successful response
#[must_use]
pub fn map_deser(e: &serde_json::Error, status: StatusCode, body: &[u8]) -> SkyGenesisError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]);
    SkyGenesisError::Api {
        message: format!("Invalid response body: {e}: {snippet}"),
        status_code: status.as_u16(),
    }
}

/// Renders a body `param` as text; non-string JSON keeps its JSON form
fn param_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Classifies a non-success response by status code
///
/// The body is parsed leniently: a missing, empty, non-string, or non-JSON
/// `message` falls back to the default for the status. Each field is read on
/// its own, so an odd `param` never hides the `message`.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> SkyGenesisError {
    let parsed: Value = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned);
    let param = parsed.get("param").and_then(param_text);

    match status {
        StatusCode::UNAUTHORIZED => SkyGenesisError::Authentication {
            message: message.unwrap_or_else(|| DEFAULT_AUTH_MESSAGE.into()),
        },
        StatusCode::BAD_REQUEST => SkyGenesisError::Validation {
            message: message.unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.into()),
            param,
        },
        other => SkyGenesisError::Api {
            message: message.unwrap_or_else(|| DEFAULT_API_MESSAGE.into()),
            status_code: other.as_u16(),
        },
    }
}
