// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization (tenant) discovery and the tenant scope guard.
//!
//! After authentication the identity provider is asked which organizations
//! the user belongs to. Each organization declares the base URL of its
//! tenant API. The client may only be bound to an API URL that starts with
//! one of those base URLs.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::KeyhubClient;
use crate::error::{KeyhubError, Result};
use crate::request::read_json;

/// One organization the authenticated user belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
	pub id: String,
	/// Base URL of the organization's tenant API.
	pub url: String,
}

/// Organizations of the current user, in the order the provider listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organizations {
	entries: Vec<Organization>,
}

impl Organizations {
	pub fn new(entries: impl IntoIterator<Item = Organization>) -> Self {
		Self {
			entries: entries.into_iter().collect(),
		}
	}

	/// Build from the `orgs/me` payload: `{ "<id>": { "url": "...", ... }, ... }`.
	///
	/// Entries without a string `url` are skipped.
	pub(crate) fn from_response(value: Value) -> Result<Self> {
		let Value::Object(map) = value else {
			return Err(KeyhubError::ParseFailed(
				"organizations response is not a JSON object".to_string(),
			));
		};

		let mut entries = Vec::with_capacity(map.len());
		for (id, details) in map {
			match details.get("url").and_then(Value::as_str) {
				Some(url) => entries.push(Organization {
					id,
					url: url.to_string(),
				}),
				None => warn!(organization_id = %id, "organization has no url, skipping"),
			}
		}

		Ok(Self { entries })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Organization> {
		self.entries.iter()
	}

	/// Base API URL of the organization with the given id.
	pub fn url_of(&self, id: &str) -> Option<&str> {
		self
			.entries
			.iter()
			.find(|org| org.id == id)
			.map(|org| org.url.as_str())
	}

	/// First organization whose URL is a string prefix of `candidate`.
	///
	/// Organizations with an empty URL never match; an empty prefix would
	/// otherwise admit every candidate.
	pub fn authorizing(&self, candidate: &str) -> Option<&Organization> {
		self
			.entries
			.iter()
			.find(|org| !org.url.is_empty() && candidate.starts_with(org.url.as_str()))
	}
}

impl<'a> IntoIterator for &'a Organizations {
	type Item = &'a Organization;
	type IntoIter = std::slice::Iter<'a, Organization>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl KeyhubClient {
	/// Organizations of the authenticated user.
	///
	/// The first call fetches them from the identity provider; later calls
	/// return the memoized map without any network traffic. A failed fetch
	/// is not cached, so the next call tries again.
	///
	/// # Errors
	///
	/// - [`KeyhubError::NotAuthenticated`] before [`KeyhubClient::authenticate`].
	/// - [`KeyhubError::RequestFailed`] / [`KeyhubError::ServerError`] when the provider call fails.
	/// - [`KeyhubError::ParseFailed`] when the payload is not a JSON object.
	#[tracing::instrument(skip(self), name = "KeyhubClient::get_organizations")]
	pub async fn get_organizations(&mut self) -> Result<&Organizations> {
		let organizations = match self.organizations.take() {
			Some(cached) => cached,
			None => self.fetch_organizations().await?,
		};
		Ok(self.organizations.insert(organizations))
	}

	async fn fetch_organizations(&self) -> Result<Organizations> {
		let token = self.token.as_ref().ok_or(KeyhubError::NotAuthenticated)?;
		let url = self.config.organizations_url();
		debug!(url = %url, "fetching organizations for current user");

		let response = self
			.http_client
			.get(&url)
			.bearer_auth(token.secret().expose())
			.header(reqwest::header::ACCEPT, "application/json")
			.send()
			.await
			.map_err(KeyhubError::RequestFailed)?;

		let organizations = Organizations::from_response(read_json(response).await?)?;
		info!(count = organizations.len(), "resolved organizations");
		Ok(organizations)
	}

	/// Bind the client to a tenant API URL.
	///
	/// `candidate` is accepted when one of the user's organization URLs is a
	/// string prefix of it (organizations are checked in the order the
	/// provider returned them). The URL is stored verbatim, not the matched
	/// prefix. Organizations are resolved first if they have not been yet.
	///
	/// On rejection the previously bound URL, if any, is left untouched.
	///
	/// # Errors
	///
	/// - [`KeyhubError::AccessDenied`] when no organization covers `candidate`.
	/// - Any error from [`KeyhubClient::get_organizations`].
	#[tracing::instrument(skip(self, candidate), name = "KeyhubClient::set_api_url")]
	pub async fn set_api_url(&mut self, candidate: impl Into<String>) -> Result<&mut Self> {
		let candidate = candidate.into();
		let organization_id = self
			.get_organizations()
			.await?
			.authorizing(&candidate)
			.map(|org| org.id.clone());

		let Some(organization_id) = organization_id else {
			warn!(api_url = %candidate, "API url is outside the user's organizations");
			return Err(KeyhubError::AccessDenied { url: candidate });
		};

		info!(api_url = %candidate, organization_id = %organization_id, "bound tenant API url");
		self.api_url = Some(candidate);
		Ok(self)
	}
}
