// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generic request executor for the tenant API.

use reqwest::header::ACCEPT;
use reqwest::{Method, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::KeyhubClient;
use crate::error::{KeyhubError, Result};

/// Query parameters and JSON body for a tenant API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
	query: Vec<(String, String)>,
	body: Option<Value>,
}

impl RequestOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a query parameter. Order is preserved on the wire.
	pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((key.into(), value.to_string()));
		self
	}

	/// Use `body` as the JSON request body.
	pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
		let value = serde_json::to_value(body)
			.map_err(|e| KeyhubError::invalid_argument(format!("request body is not serializable: {e}")))?;
		self.body = Some(value);
		Ok(self)
	}

	pub fn query_pairs(&self) -> &[(String, String)] {
		&self.query
	}

	pub fn body(&self) -> Option<&Value> {
		self.body.as_ref()
	}
}

impl KeyhubClient {
	/// Send a request to `{api_url}{path}` and decode the JSON answer.
	///
	/// `path` is appended to the bound API URL as-is, so it should not start
	/// with `/` when the API URL ends with one. An empty 2xx body decodes as
	/// [`Value::Null`].
	///
	/// # Errors
	///
	/// - [`KeyhubError::ApiUrlNotSet`] when no API URL is bound. Checked on
	///   every call, before any network I/O.
	/// - [`KeyhubError::RequestFailed`] on transport failure.
	/// - [`KeyhubError::ServerError`] on a non-2xx answer.
	/// - [`KeyhubError::ParseFailed`] when the body is not JSON.
	#[tracing::instrument(skip(self, method, options), fields(method = %method), name = "KeyhubClient::request")]
	pub async fn request(&self, path: &str, method: Method, options: RequestOptions) -> Result<Value> {
		let api_url = self.api_url.as_deref().ok_or(KeyhubError::ApiUrlNotSet)?;
		let token = self.token.as_ref().ok_or(KeyhubError::NotAuthenticated)?;

		let url = format!("{api_url}{path}");
		debug!(url = %url, query_params = options.query.len(), has_body = options.body.is_some(), "sending tenant API request");

		let mut builder = self
			.http_client
			.request(method, &url)
			.bearer_auth(token.secret().expose())
			.header(ACCEPT, "application/json");

		if !options.query.is_empty() {
			builder = builder.query(&options.query);
		}
		if let Some(body) = &options.body {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(KeyhubError::RequestFailed)?;
		read_json(response).await
	}
}

/// Read a response body as JSON, turning non-2xx answers into errors.
pub(crate) async fn read_json(response: Response) -> Result<Value> {
	let status = response.status();
	let body = response.text().await.map_err(KeyhubError::RequestFailed)?;

	if !status.is_success() {
		let message = if body.trim().is_empty() {
			status.canonical_reason().unwrap_or("unknown error").to_string()
		} else {
			body
		};
		debug!(status = status.as_u16(), "upstream returned an error");
		return Err(KeyhubError::ServerError {
			status: status.as_u16(),
			message,
		});
	}

	if body.trim().is_empty() {
		return Ok(Value::Null);
	}

	serde_json::from_str(&body).map_err(|e| KeyhubError::ParseFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_options_preserve_query_order() {
		let options = RequestOptions::new()
			.query("identifierSubstring", "abc")
			.query("page", 1)
			.query("itemsPerPage", 100);

		let keys: Vec<&str> = options.query_pairs().iter().map(|(k, _)| k.as_str()).collect();
		assert_eq!(keys, vec!["identifierSubstring", "page", "itemsPerPage"]);
		assert_eq!(options.query_pairs()[2].1, "100");
		assert!(options.body().is_none());
	}

	#[test]
	fn test_options_json_body() {
		let options = RequestOptions::new()
			.json(&json!({"identifier": "alice"}))
			.unwrap();
		assert_eq!(options.body(), Some(&json!({"identifier": "alice"})));
	}
}
