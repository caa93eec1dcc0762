use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::{Config, SkyGenesisConfig},
    error::{self, SkyGenesisError},
    request::{RequestOptions, Verb},
    retry,
};

/// Sky Genesis API client
///
/// The client is generic over a [`Config`] implementation that provides
/// authentication and transport defaults. Clones share the underlying
/// connection pool and the configuration, so [`set_api_key`](Self::set_api_key)
/// on one clone is seen by all of them.
///
/// Every call captures a snapshot of the configuration when it is dispatched;
/// changing the key or timeout never affects a call already in flight.
#[derive(Debug, Clone)]
pub struct Client<C: Config = SkyGenesisConfig> {
    http: reqwest::Client,
    config: Arc<RwLock<Arc<C>>>,
    backoff: ExponentialBuilder,
}

impl Client<SkyGenesisConfig> {
    /// Creates a client for the given API key with default settings
    ///
    /// `SKYGENESIS_BASE_URL` is still honoured for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SkyGenesisError> {
        Self::with_config(SkyGenesisConfig::new().with_api_key(api_key))
    }

    /// Creates a client configured entirely from the environment
    ///
    /// # Errors
    ///
    /// Returns an authentication error if `SKYGENESIS_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, SkyGenesisError> {
        Self::with_config(SkyGenesisConfig::new())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// No request is made; the key is only checked for presence.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the configuration has no API key,
    /// or a request error if the HTTP client cannot be built.
    pub fn with_config(config: C) -> Result<Self, SkyGenesisError> {
        config.validate_auth()?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(SkyGenesisError::request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(Arc::new(config))),
            backoff: retry::default_backoff_builder(),
        })
    }

    /// Replaces the HTTP client with a custom one
    ///
    /// Useful for proxies or TLS settings. Request timeouts still come from
    /// the configuration.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the backoff shape used between network retries
    ///
    /// The number of retries always comes from the configuration.
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the current configuration snapshot
    #[must_use]
    pub fn config(&self) -> Arc<C> {
        Arc::clone(&self.config.read())
    }

    /// Replaces the API key for all subsequently dispatched calls
    ///
    /// # Errors
    ///
    /// Returns an authentication error, and keeps the old key, if `api_key` is empty.
    pub fn set_api_key(&self, api_key: impl Into<String>) -> Result<(), SkyGenesisError> {
        let mut guard = self.config.write();
        let mut next = (**guard).clone();
        next.set_api_key(api_key.into());
        next.validate_auth()?;
        *guard = Arc::new(next);
        tracing::debug!("API key replaced");
        Ok(())
    }

    /// Replaces the default timeout for all subsequently dispatched calls
    pub fn set_timeout(&self, timeout: Duration) {
        let mut guard = self.config.write();
        let mut next = (**guard).clone();
        next.set_timeout(timeout);
        *guard = Arc::new(next);
        tracing::debug!(?timeout, "default timeout replaced");
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// `payload` goes in the query string for `GET`/`DELETE` and in the JSON
    /// body for `POST`/`PUT`/`PATCH`. An empty response body decodes as JSON
    /// `null`, so `O = ()` or `serde_json::Value` suit `204` responses.
    ///
    /// Network failures are retried up to the configured
    /// `max_network_retries`. A `POST`/`PUT`/`PATCH` is only sent again when
    /// the connection was never established; every other failure is
    /// returned immediately.
    ///
    /// # Errors
    ///
    /// - [`SkyGenesisError::Authentication`] on HTTP 401
    /// - [`SkyGenesisError::Validation`] on HTTP 400
    /// - [`SkyGenesisError::Api`] on any other status, with status code 0 when
    ///   no response was received or the request could not be built
    pub async fn request<I, O>(
        &self,
        verb: Verb,
        path: &str,
        payload: Option<&I>,
        options: &RequestOptions,
    ) -> Result<O, SkyGenesisError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let cfg = self.config();
        cfg.validate_auth()?;

        tracing::debug!(%verb, path, "dispatching request");

        let (status, bytes): (StatusCode, Bytes) = (|| async {
            let request = self
                .build_request(&cfg, verb, path, payload, options)
                .map_err(Attempt::fatal)?;
            let response = self.http.execute(request).await.map_err(|e| Attempt {
                replayable: error::is_replay_safe(verb, &e),
                error: error::classify_transport(&e),
            })?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(|e| {
                tracing::debug!(error = %e, "response body interrupted");
                Attempt {
                    error: SkyGenesisError::network(),
                    replayable: !verb.carries_body(),
                }
            })?;

            if status.is_success() {
                return Ok((status, bytes));
            }

            let err = error::deserialize_api_error(status, &bytes);
            tracing::debug!(status = status.as_u16(), kind = ?err.kind(), "request failed");
            Err(Attempt::fatal(err))
        })
        .retry(retry::with_budget(self.backoff, cfg.max_network_retries()))
        .when(|a: &Attempt| a.replayable)
        .notify(|a: &Attempt, dur: Duration| {
            tracing::warn!(%verb, path, error = %a.error, "retrying in {dur:?}");
        })
        .await
        .map_err(|a| a.error)?;

        tracing::debug!(status = status.as_u16(), "request succeeded");

        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(body).map_err(|e| error::map_deser(&e, status, &bytes))
    }

    /// [`request`](Self::request) without a payload
    pub(crate) async fn send<O: DeserializeOwned>(
        &self,
        verb: Verb,
        path: &str,
        options: &RequestOptions,
    ) -> Result<O, SkyGenesisError> {
        self.request::<(), O>(verb, path, None, options).await
    }

    fn build_request<I>(
        &self,
        cfg: &C,
        verb: Verb,
        path: &str,
        payload: Option<&I>,
        options: &RequestOptions,
    ) -> Result<reqwest::Request, SkyGenesisError>
    where
        I: Serialize + ?Sized,
    {
        let mut headers = cfg.headers()?;
        options.apply_headers(&mut headers)?;

        let mut builder = self
            .http
            .request(verb.into(), cfg.url(path))
            .headers(headers)
            .timeout(options.timeout().unwrap_or_else(|| cfg.timeout()));

        if let Some(payload) = payload {
            builder = if verb.carries_body() {
                builder.json(payload)
            } else {
                builder.query(payload)
            };
        }

        builder.build().map_err(SkyGenesisError::request)
    }
}

/// A failed attempt and whether sending it again is safe
struct Attempt {
    error: SkyGenesisError,
    replayable: bool,
}

impl Attempt {
    const fn fatal(error: SkyGenesisError) -> Self {
        Self {
            error,
            replayable: false,
        }
    }
}
