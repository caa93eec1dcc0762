use crate::{
    client::Client,
    config::Config,
    error::SkyGenesisError,
    request::{RequestOptions, Verb},
    types::auth::{AuthCredentials, AuthResponse, RefreshTokenRequest},
};

/// API resource for the `/auth` endpoints
pub struct Auth<'c, C: Config> {
    client: &'c Client<C>,
    options: RequestOptions,
}

impl<'c, C: Config> Auth<'c, C> {
    /// Creates a new Auth resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self {
            client,
            options: RequestOptions::new(),
        }
    }

    /// Applies transport overrides to every call made through this handle
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Exchanges credentials for tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn login(&self, credentials: &AuthCredentials) -> Result<AuthResponse, SkyGenesisError> {
        self.client
            .request(Verb::Post, "/auth/login", Some(credentials), &self.options)
            .await
    }

    /// Ends the current session
    ///
    /// Returns the response body, or `Value::Null` for an empty `204`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn logout(&self) -> Result<serde_json::Value, SkyGenesisError> {
        self.client
            .send(Verb::Post, "/auth/logout", &self.options)
            .await
    }

    /// Trades a refresh token for a new access token
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn refresh_token(
        &self,
        refresh_token: impl Into<String>,
    ) -> Result<AuthResponse, SkyGenesisError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.into(),
        };
        self.client
            .request(Verb::Post, "/auth/refresh", Some(&body), &self.options)
            .await
    }
}

// Add accessor to client
impl<C: Config> crate::Client<C> {
    /// Returns the Auth API resource
    #[must_use]
    pub const fn auth(&self) -> Auth<'_, C> {
        Auth::new(self)
    }
}
