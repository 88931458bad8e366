// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration: identity provider location and account credentials.

use std::time::Duration;

use keyhub_common_config::{
	optional_env_parsed, require_env, require_secret_env, EnvError, SecretString,
};
use url::Url;

use crate::error::{KeyhubError, Result};

pub const ENV_AUTH_URL: &str = "KEYHUB_AUTH_URL";
pub const ENV_REALM: &str = "KEYHUB_REALM";
pub const ENV_CLIENT_ID: &str = "KEYHUB_CLIENT_ID";
pub const ENV_USERNAME: &str = "KEYHUB_USERNAME";
/// Also read from `KEYHUB_PASSWORD_FILE`.
pub const ENV_PASSWORD: &str = "KEYHUB_PASSWORD";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "KEYHUB_REQUEST_TIMEOUT_SECS";

/// Everything needed to authenticate against the identity provider.
///
/// The password is a [`SecretString`] and never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Base URL of the identity provider, e.g. `https://auth.example.cloud`.
	pub auth_url: String,
	/// Identity provider realm the account lives in.
	pub realm: String,
	/// OAuth client id used for the password grant.
	pub client_id: String,
	pub username: String,
	pub password: SecretString,
	/// Per-request timeout applied by the HTTP transport.
	pub request_timeout: Option<Duration>,
}

impl ClientConfig {
	pub fn new(
		auth_url: impl Into<String>,
		realm: impl Into<String>,
		client_id: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<SecretString>,
	) -> Self {
		Self {
			auth_url: auth_url.into(),
			realm: realm.into(),
			client_id: client_id.into(),
			username: username.into(),
			password: password.into(),
			request_timeout: None,
		}
	}

	/// Load configuration from `KEYHUB_*` environment variables.
	///
	/// # Required
	///
	/// - `KEYHUB_AUTH_URL`
	/// - `KEYHUB_REALM`
	/// - `KEYHUB_CLIENT_ID`
	/// - `KEYHUB_USERNAME`
	/// - `KEYHUB_PASSWORD` or `KEYHUB_PASSWORD_FILE`
	///
	/// # Optional
	///
	/// - `KEYHUB_REQUEST_TIMEOUT_SECS`
	pub fn from_env() -> Result<Self> {
		let config = Self {
			auth_url: require_env(ENV_AUTH_URL).map_err(env_error)?,
			realm: require_env(ENV_REALM).map_err(env_error)?,
			client_id: require_env(ENV_CLIENT_ID).map_err(env_error)?,
			username: require_env(ENV_USERNAME).map_err(env_error)?,
			password: require_secret_env(ENV_PASSWORD).map_err(env_error)?,
			request_timeout: optional_env_parsed::<u64>(ENV_REQUEST_TIMEOUT_SECS)
				.map_err(env_error)?
				.map(Duration::from_secs),
		};

		tracing::debug!(
			auth_url = %config.auth_url,
			realm = %config.realm,
			username = %config.username,
			"loaded client configuration from environment"
		);

		Ok(config)
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	/// Check that every field is present and the auth URL is an absolute
	/// `http`/`https` URL.
	pub fn validate(&self) -> Result<()> {
		if self.auth_url.is_empty() {
			return Err(KeyhubError::invalid_config("auth_url cannot be empty"));
		}
		let parsed = Url::parse(&self.auth_url)
			.map_err(|e| KeyhubError::invalid_config(format!("auth_url is not a valid URL: {e}")))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(KeyhubError::invalid_config(format!(
				"auth_url must use http or https, got {}",
				parsed.scheme()
			)));
		}
		if self.realm.is_empty() {
			return Err(KeyhubError::invalid_config("realm cannot be empty"));
		}
		if self.client_id.is_empty() {
			return Err(KeyhubError::invalid_config("client_id cannot be empty"));
		}
		if self.username.is_empty() {
			return Err(KeyhubError::invalid_config("username cannot be empty"));
		}
		if self.password.is_empty() {
			return Err(KeyhubError::invalid_config("password cannot be empty"));
		}
		Ok(())
	}

	/// Password-grant token endpoint for the configured realm.
	pub fn token_url(&self) -> String {
		format!(
			"{}/realms/{}/protocol/openid-connect/token",
			self.base_auth_url(),
			self.realm
		)
	}

	/// Identity provider operation listing the current user's organizations.
	pub fn organizations_url(&self) -> String {
		format!("{}/realms/{}/orgs/me", self.base_auth_url(), self.realm)
	}

	fn base_auth_url(&self) -> &str {
		self.auth_url.trim_end_matches('/')
	}
}

fn env_error(e: EnvError) -> KeyhubError {
	KeyhubError::InvalidConfig(e.to_string())
}
