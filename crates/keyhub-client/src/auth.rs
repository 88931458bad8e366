// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth password grant against the identity provider.

use keyhub_common_config::SecretString;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{KeyhubError, Result};

/// Bearer token obtained from the password grant.
#[derive(Debug, Clone)]
pub struct AccessToken {
	secret: SecretString,
	token_type: String,
	expires_in: Option<u64>,
}

impl AccessToken {
	/// The token value. Sent as `Authorization: Bearer {token}`.
	pub fn secret(&self) -> &SecretString {
		&self.secret
	}

	pub fn token_type(&self) -> &str {
		&self.token_type
	}

	/// Lifetime in seconds as reported by the provider. The SDK does not
	/// refresh tokens; callers build a new client once this lapses.
	pub fn expires_in(&self) -> Option<u64> {
		self.expires_in
	}
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: Option<SecretString>,
	token_type: Option<String>,
	expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
	error: Option<String>,
	error_description: Option<String>,
}

/// Exchange the configured credentials for an access token.
pub(crate) async fn password_grant(http_client: &Client, config: &ClientConfig) -> Result<AccessToken> {
	let token_url = config.token_url();
	tracing::debug!(url = %token_url, "requesting access token");

	let response = http_client
		.post(&token_url)
		.header(reqwest::header::ACCEPT, "application/json")
		.form(&[
			("grant_type", "password"),
			("client_id", config.client_id.as_str()),
			("username", config.username.as_str()),
			("password", config.password.expose().as_str()),
		])
		.send()
		.await
		.map_err(KeyhubError::IdentityProviderUnreachable)?;

	let status = response.status();
	let body = response
		.text()
		.await
		.map_err(KeyhubError::IdentityProviderUnreachable)?;

	if !status.is_success() {
		return Err(grant_error(status, &body));
	}

	parse_token_response(&body)
}

/// Credential rejections are authentication failures; any other non-2xx
/// answer is an upstream error.
fn grant_error(status: reqwest::StatusCode, body: &str) -> KeyhubError {
	let message = provider_error_message(body, status);
	if is_credential_rejection(status) {
		KeyhubError::AuthenticationFailed {
			status: status.as_u16(),
			message,
		}
	} else {
		tracing::warn!(status = status.as_u16(), "token endpoint returned an error");
		KeyhubError::ServerError {
			status: status.as_u16(),
			message,
		}
	}
}

fn is_credential_rejection(status: reqwest::StatusCode) -> bool {
	matches!(status.as_u16(), 400 | 401 | 403)
}

fn parse_token_response(body: &str) -> Result<AccessToken> {
	let parsed: TokenResponse = serde_json::from_str(body)
		.map_err(|e| KeyhubError::ParseFailed(format!("failed to parse token response: {e}")))?;

	let secret = parsed
		.access_token
		.filter(|t| !t.is_empty())
		.ok_or_else(|| KeyhubError::ParseFailed("token response missing access_token".to_string()))?;

	Ok(AccessToken {
		secret,
		token_type: parsed.token_type.unwrap_or_else(|| "Bearer".to_string()),
		expires_in: parsed.expires_in,
	})
}

fn provider_error_message(body: &str, status: reqwest::StatusCode) -> String {
	if let Ok(err) = serde_json::from_str::<ProviderErrorResponse>(body) {
		if let Some(message) = err.error_description.or(err.error) {
			return message;
		}
	}
	if body.trim().is_empty() {
		status.canonical_reason().unwrap_or("unknown error").to_string()
	} else {
		body.to_string()
	}
}
