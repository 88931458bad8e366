// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Users and their identifiers.

use reqwest::Method;
use serde_json::Value;

use super::{list_options, Filters, Pagination};
use crate::client::KeyhubClient;
use crate::error::{KeyhubError, Result};
use crate::models::{IdentifierType, NewIdentifier, NewUser};
use crate::request::RequestOptions;

/// Filter key for substring search on user identifiers.
pub const IDENTIFIER_SUBSTRING_FILTER: &str = "identifierSubstring";
/// Shortest substring the server will search for.
pub const MIN_IDENTIFIER_SUBSTRING_LEN: usize = 3;

impl KeyhubClient {
	/// Create a user. `POST users/` with `{"identifier": ...}`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::create_user")]
	pub async fn create_user(&self, identifier: &str) -> Result<Value> {
		let options = RequestOptions::new().json(&NewUser { identifier })?;
		self.request("users/", Method::POST, options).await
	}

	/// Bind a credential to a user. `POST users/{user_id}/identifiers`.
	#[tracing::instrument(skip(self, value), name = "KeyhubClient::create_identifier")]
	pub async fn create_identifier(
		&self,
		user_id: i64,
		value: &str,
		identifier_type: IdentifierType,
	) -> Result<Value> {
		let options = RequestOptions::new().json(&NewIdentifier {
			identifier_type,
			value,
		})?;
		self
			.request(&format!("users/{user_id}/identifiers"), Method::POST, options)
			.await
	}

	/// Like [`KeyhubClient::create_identifier`] with the type given as its
	/// wire name (`pin`, `rfid-tag`, `licence-plate`).
	///
	/// Any other name fails with [`KeyhubError::InvalidArgument`] before a
	/// request is sent.
	pub async fn create_identifier_with_type_str(
		&self,
		user_id: i64,
		value: &str,
		identifier_type: &str,
	) -> Result<Value> {
		let identifier_type = identifier_type.parse::<IdentifierType>()?;
		self.create_identifier(user_id, value, identifier_type).await
	}

	/// List users. `GET users` with filters plus paging.
	///
	/// Any `identifierSubstring` value shorter than three characters fails
	/// with [`KeyhubError::InvalidArgument`] before a request is sent.
	#[tracing::instrument(skip(self), name = "KeyhubClient::list_users")]
	pub async fn list_users(&self, filters: &Filters, pagination: Pagination) -> Result<Value> {
		for substring in filters.get_all(IDENTIFIER_SUBSTRING_FILTER) {
			if substring.chars().count() < MIN_IDENTIFIER_SUBSTRING_LEN {
				return Err(KeyhubError::invalid_argument(format!(
					"{IDENTIFIER_SUBSTRING_FILTER} must be at least {MIN_IDENTIFIER_SUBSTRING_LEN} characters"
				)));
			}
		}
		self
			.request("users", Method::GET, list_options(filters, pagination))
			.await
	}

	/// Fetch one user. `GET users/{user_id}`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::get_user")]
	pub async fn get_user(&self, user_id: i64) -> Result<Value> {
		self
			.request(&format!("users/{user_id}"), Method::GET, RequestOptions::new())
			.await
	}

	/// Identifiers bound to a user. `GET users/{user_id}/identifiers`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::list_identifiers")]
	pub async fn list_identifiers(&self, user_id: i64) -> Result<Value> {
		self
			.request(
				&format!("users/{user_id}/identifiers"),
				Method::GET,
				RequestOptions::new(),
			)
			.await
	}
}
