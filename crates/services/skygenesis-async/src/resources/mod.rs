//! API resource implementations for the Sky Genesis client
//!
//! `users` and `projects` expose the same five operations over different path
//! prefixes, so both are generated from the `crud_resource!` table.

/// Generates a CRUD resource handle and its accessor on [`Client`](crate::Client).
///
/// Table row: `Handle, accessor, "/prefix", Model`.
macro_rules! crud_resource {
    ($(#[$meta:meta])* $name:ident, $accessor:ident, $prefix:literal, $model:ty) => {
        $(#[$meta])*
        pub struct $name<'c, C: $crate::config::Config> {
            client: &'c $crate::client::Client<C>,
            options: $crate::request::RequestOptions,
        }

        impl<'c, C: $crate::config::Config> $name<'c, C> {
            /// Creates a new resource handle
            #[must_use]
            pub const fn new(client: &'c $crate::client::Client<C>) -> Self {
                Self {
                    client,
                    options: $crate::request::RequestOptions::new(),
                }
            }

            /// Applies transport overrides to every call made through this handle
            #[must_use]
            pub fn with_options(mut self, options: $crate::request::RequestOptions) -> Self {
                self.options = options;
                self
            }

            #[doc = concat!("Creates an item (`POST ", $prefix, "`)")]
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails or the API returns an error.
            pub async fn create<P>(&self, params: &P) -> Result<$model, $crate::error::SkyGenesisError>
            where
                P: serde::Serialize + Sync + ?Sized,
            {
                self.client
                    .request($crate::request::Verb::Post, $prefix, Some(params), &self.options)
                    .await
            }

            #[doc = concat!("Fetches one item (`GET ", $prefix, "/{id}`)")]
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails or the API returns an error.
            pub async fn retrieve(&self, id: &str) -> Result<$model, $crate::error::SkyGenesisError> {
                self.client
                    .send($crate::request::Verb::Get, &$crate::resources::item_path($prefix, id), &self.options)
                    .await
            }

            #[doc = concat!("Replaces fields of an item (`PUT ", $prefix, "/{id}`)")]
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails or the API returns an error.
            pub async fn update<P>(&self, id: &str, params: &P) -> Result<$model, $crate::error::SkyGenesisError>
            where
                P: serde::Serialize + Sync + ?Sized,
            {
                self.client
                    .request(
                        $crate::request::Verb::Put,
                        &$crate::resources::item_path($prefix, id),
                        Some(params),
                        &self.options,
                    )
                    .await
            }

            #[doc = concat!("Lists items (`GET ", $prefix, "`); `params` go in the query string")]
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails or the API returns an error.
            pub async fn list(
                &self,
                params: &$crate::types::ListParams,
            ) -> Result<$crate::types::ListResponse<$model>, $crate::error::SkyGenesisError> {
                self.client
                    .request($crate::request::Verb::Get, $prefix, Some(params), &self.options)
                    .await
            }

            #[doc = concat!("Deletes an item (`DELETE ", $prefix, "/{id}`)")]
            ///
            /// Returns the response body, or `Value::Null` for an empty `204`.
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails or the API returns an error.
            pub async fn delete(&self, id: &str) -> Result<serde_json::Value, $crate::error::SkyGenesisError> {
                self.client
                    .send($crate::request::Verb::Delete, &$crate::resources::item_path($prefix, id), &self.options)
                    .await
            }
        }

        impl<C: $crate::config::Config> $crate::client::Client<C> {
            #[doc = concat!("Returns the `", $prefix, "` API resource")]
            #[must_use]
            pub const fn $accessor(&self) -> $name<'_, C> {
                $name::new(self)
            }
        }
    };
}

/// Auth API resource
pub mod auth;
/// Projects API resource
pub mod projects;
/// Users API resource
pub mod users;

pub use auth::Auth;
pub use projects::Projects;
pub use users::Users;

/// Joins a collection prefix and a percent-encoded item id
pub(crate) fn item_path(prefix: &str, id: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(id))
}
