// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Keyhub client: session state and construction.

use std::time::Duration;

use keyhub_common_config::SecretString;
use reqwest::Client;
use tracing::info;

use crate::auth::{password_grant, AccessToken};
use crate::config::ClientConfig;
use crate::error::{KeyhubError, Result};
use crate::organizations::Organizations;

/// SDK version for identification.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builder for constructing a [`KeyhubClient`].
#[derive(Debug, Default)]
pub struct KeyhubClientBuilder {
	auth_url: Option<String>,
	realm: Option<String>,
	client_id: Option<String>,
	username: Option<String>,
	password: Option<SecretString>,
	request_timeout: Option<Duration>,
}

impl KeyhubClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start from an existing configuration, e.g. [`ClientConfig::from_env`].
	pub fn config(mut self, config: ClientConfig) -> Self {
		self.auth_url = Some(config.auth_url);
		self.realm = Some(config.realm);
		self.client_id = Some(config.client_id);
		self.username = Some(config.username);
		self.password = Some(config.password);
		self.request_timeout = config.request_timeout;
		self
	}

	/// Base URL of the identity provider.
	///
	/// Example: `https://auth.example.cloud`
	pub fn auth_url(mut self, url: impl Into<String>) -> Self {
		self.auth_url = Some(url.into());
		self
	}

	pub fn realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());
		self
	}

	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());
		self
	}

	pub fn username(mut self, username: impl Into<String>) -> Self {
		self.username = Some(username.into());
		self
	}

	pub fn password(mut self, password: impl Into<SecretString>) -> Self {
		self.password = Some(password.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	/// Validate the configuration and build an unauthenticated client.
	pub fn build(self) -> Result<KeyhubClient> {
		let config = ClientConfig {
			auth_url: required(self.auth_url, "auth_url")?,
			realm: required(self.realm, "realm")?,
			client_id: required(self.client_id, "client_id")?,
			username: required(self.username, "username")?,
			password: self
				.password
				.ok_or_else(|| KeyhubError::invalid_config("missing password"))?,
			request_timeout: self.request_timeout,
		};
		KeyhubClient::new(config)
	}
}

fn required(value: Option<String>, field: &str) -> Result<String> {
	value.ok_or_else(|| KeyhubError::invalid_config(format!("missing {field}")))
}

/// Client for the Keyhub access-control API.
///
/// Lifecycle: build → [`authenticate`](Self::authenticate) →
/// [`set_api_url`](Self::set_api_url) → resource calls.
///
/// State-changing calls take `&mut self` and resource calls take `&self`,
/// so the API URL cannot change while a request borrows the client. To
/// share one instance across tasks, wrap it in a lock of your choice; the
/// client does no internal synchronization.
///
/// # Example
///
/// ```ignore
/// use keyhub_client::{Filters, KeyhubClient, Pagination};
///
/// let mut client = KeyhubClient::builder()
///     .auth_url("https://auth.example.cloud")
///     .realm("tenants")
///     .client_id("access-api")
///     .username("operator")
///     .password("pa55word")
///     .build()?;
///
/// client.authenticate().await?;
/// client
///     .set_api_url("https://org1.example.cloud/v1/api/")
///     .await?;
///
/// let user = client.create_user("alice").await?;
/// let users = client.list_users(&Filters::new(), Pagination::default()).await?;
/// ```
#[derive(Debug)]
pub struct KeyhubClient {
	pub(crate) config: ClientConfig,
	pub(crate) http_client: Client,
	pub(crate) token: Option<AccessToken>,
	pub(crate) organizations: Option<Organizations>,
	pub(crate) api_url: Option<String>,
}

impl KeyhubClient {
	/// Creates a new builder for constructing a KeyhubClient.
	pub fn builder() -> KeyhubClientBuilder {
		KeyhubClientBuilder::new()
	}

	/// Build an unauthenticated client from a configuration.
	pub fn new(config: ClientConfig) -> Result<Self> {
		config.validate()?;

		let http_client = keyhub_common_http::build_client(config.request_timeout)
			.map_err(|e| KeyhubError::invalid_config(format!("failed to build HTTP client: {e}")))?;

		info!(
			auth_url = %config.auth_url,
			realm = %config.realm,
			sdk_version = SDK_VERSION,
			"Keyhub client initialized"
		);

		Ok(Self {
			config,
			http_client,
			token: None,
			organizations: None,
			api_url: None,
		})
	}

	/// Obtain a bearer token with the configured credentials.
	///
	/// Calling again replaces the token. Resolved organizations and the bound
	/// API URL are kept.
	///
	/// # Errors
	///
	/// - [`KeyhubError::AuthenticationFailed`] when the provider rejects the credentials.
	/// - [`KeyhubError::ServerError`] when the token endpoint answers with any other non-2xx status.
	/// - [`KeyhubError::IdentityProviderUnreachable`] on transport failure.
	/// - [`KeyhubError::ParseFailed`] when the token response lacks `access_token`.
	#[tracing::instrument(
		skip(self),
		fields(realm = %self.config.realm, username = %self.config.username),
		name = "KeyhubClient::authenticate"
	)]
	pub async fn authenticate(&mut self) -> Result<()> {
		let token = password_grant(&self.http_client, &self.config).await?;
		info!(expires_in = ?token.expires_in(), "authenticated");
		self.token = Some(token);
		Ok(())
	}

	pub fn is_authenticated(&self) -> bool {
		self.token.is_some()
	}

	/// Current bearer token, if authenticated.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.token.as_ref()
	}

	/// The bound tenant API URL, if any.
	pub fn api_url(&self) -> Option<&str> {
		self.api_url.as_deref()
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builder() -> KeyhubClientBuilder {
		KeyhubClient::builder()
			.auth_url("https://auth.example.cloud")
			.realm("tenants")
			.client_id("access-api")
			.username("operator")
			.password("pa55word")
	}

	#[test]
	fn test_builder_success() {
		let client = builder().build().unwrap();
		assert!(!client.is_authenticated());
		assert!(client.api_url().is_none());
		assert!(client.access_token().is_none());
	}

	#[test]
	fn test_builder_requires_fields() {
		let result = KeyhubClient::builder()
			.realm("tenants")
			.client_id("access-api")
			.username("operator")
			.password("pa55word")
			.build();
		assert!(matches!(result, Err(KeyhubError::InvalidConfig(ref m)) if m.contains("auth_url")));

		let result = KeyhubClient::builder()
			.auth_url("https://auth.example.cloud")
			.realm("tenants")
			.client_id("access-api")
			.username("operator")
			.build();
		assert!(matches!(result, Err(KeyhubError::InvalidConfig(ref m)) if m.contains("password")));
	}

	#[test]
	fn test_builder_validates() {
		let result = builder().auth_url("not a url").build();
		assert!(matches!(result, Err(KeyhubError::InvalidConfig(_))));
	}

	#[test]
	fn test_builder_from_config() {
		let config = ClientConfig::new(
			"https://auth.example.cloud",
			"tenants",
			"access-api",
			"operator",
			"pa55word",
		)
		.with_request_timeout(Duration::from_secs(3));

		let client = KeyhubClient::builder().config(config).build().unwrap();
		assert_eq!(client.config().realm, "tenants");
		assert_eq!(client.config().request_timeout, Some(Duration::from_secs(3)));
	}

	#[test]
	fn test_debug_hides_password() {
		let client = builder().build().unwrap();
		assert!(!format!("{client:?}").contains("pa55word"));
	}

	#[tokio::test]
	async fn test_get_organizations_requires_token() {
		let mut client = builder().build().unwrap();
		let err = client.get_organizations().await.unwrap_err();
		assert!(matches!(err, KeyhubError::NotAuthenticated));
	}

	#[tokio::test]
	async fn test_request_requires_api_url() {
		let client = builder().build().unwrap();
		let err = client.create_user("alice").await.unwrap_err();
		assert!(matches!(err, KeyhubError::ApiUrlNotSet));
	}
}
