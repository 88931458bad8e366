// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Granted accesses: time-bounded links between a user and a context.

use chrono::NaiveDateTime;
use reqwest::Method;
use serde_json::Value;

use super::{list_options, Filters, Pagination};
use crate::client::KeyhubClient;
use crate::error::Result;
use crate::models::GrantBody;
use crate::request::RequestOptions;

impl KeyhubClient {
	/// Grant `user_id` access to `context_id`. `POST grants/`.
	///
	/// `valid_from = None` means effective immediately, `valid_to = None`
	/// means no expiry. Absent bounds are sent as `null`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::create_granted_access")]
	pub async fn create_granted_access(
		&self,
		context_id: i64,
		user_id: i64,
		valid_from: Option<NaiveDateTime>,
		valid_to: Option<NaiveDateTime>,
	) -> Result<Value> {
		let body = GrantBody::new(context_id, user_id, valid_from, valid_to);
		let options = RequestOptions::new().json(&body)?;
		self.request("grants/", Method::POST, options).await
	}

	/// Update an existing grant. `PATCH grants/{id}` with the creation body.
	///
	/// Both bounds are always sent, so passing `None` clears that side of
	/// the validity window.
	#[tracing::instrument(skip(self), name = "KeyhubClient::update_granted_access")]
	pub async fn update_granted_access(
		&self,
		id: i64,
		context_id: i64,
		user_id: i64,
		valid_from: Option<NaiveDateTime>,
		valid_to: Option<NaiveDateTime>,
	) -> Result<Value> {
		let body = GrantBody::new(context_id, user_id, valid_from, valid_to);
		let options = RequestOptions::new().json(&body)?;
		self
			.request(&format!("grants/{id}"), Method::PATCH, options)
			.await
	}

	/// List grants. `GET grants` with filters plus paging.
	#[tracing::instrument(skip(self), name = "KeyhubClient::list_granted_accesses")]
	pub async fn list_granted_accesses(
		&self,
		filters: &Filters,
		pagination: Pagination,
	) -> Result<Value> {
		self
			.request("grants", Method::GET, list_options(filters, pagination))
			.await
	}

	/// Fetch one grant. `GET grants/{id}`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::get_granted_access")]
	pub async fn get_granted_access(&self, id: i64) -> Result<Value> {
		self
			.request(&format!("grants/{id}"), Method::GET, RequestOptions::new())
			.await
	}

	/// Revoke a grant. `DELETE grants/{id}`.
	#[tracing::instrument(skip(self), name = "KeyhubClient::delete_granted_access")]
	pub async fn delete_granted_access(&self, id: i64) -> Result<Value> {
		self
			.request(&format!("grants/{id}"), Method::DELETE, RequestOptions::new())
			.await
	}
}
