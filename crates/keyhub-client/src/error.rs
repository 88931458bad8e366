// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Keyhub SDK.

use thiserror::Error;

/// Result type alias for the Keyhub SDK.
pub type Result<T> = std::result::Result<T, KeyhubError>;

/// Broad category of a [`KeyhubError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Credentials rejected, identity provider unreachable, or no token yet.
	Authentication,
	/// The requested API URL is outside the user's organizations.
	Authorization,
	/// The client is missing required setup (API URL, configuration values).
	Configuration,
	/// A caller-supplied argument failed client-side validation.
	InvalidArgument,
	/// A network failure or non-2xx answer from the identity provider or tenant API.
	Upstream,
	/// A response body could not be decoded.
	Parse,
}

/// Errors that can occur in the Keyhub SDK.
#[derive(Error, Debug)]
pub enum KeyhubError {
	/// The identity provider rejected the password grant.
	#[error("authentication failed ({status}): {message}")]
	AuthenticationFailed {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Provider error description, or the raw body.
		message: String,
	},

	/// The token endpoint could not be reached.
	#[error("identity provider unreachable: {0}")]
	IdentityProviderUnreachable(#[source] reqwest::Error),

	/// An operation needing a bearer token ran before `authenticate`.
	#[error("client is not authenticated")]
	NotAuthenticated,

	/// The candidate API URL is not under any of the user's organizations.
	#[error("user has no access to {url}")]
	AccessDenied {
		/// The rejected API URL.
		url: String,
	},

	/// A tenant API call ran before an API URL was bound.
	#[error("API url must be specified first")]
	ApiUrlNotSet,

	/// Client configuration is missing or malformed.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// A caller-supplied argument was rejected before any request was sent.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The HTTP request failed in transport.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[source] reqwest::Error),

	/// The server answered with a non-2xx status.
	#[error("server returned an error: {status} - {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Response body, or the status reason when the body is empty.
		message: String,
	},

	/// A response body was not valid JSON or lacked a required field.
	#[error("failed to parse response: {0}")]
	ParseFailed(String),
}

impl KeyhubError {
	/// Map this error onto its category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			KeyhubError::AuthenticationFailed { .. }
			| KeyhubError::IdentityProviderUnreachable(_)
			| KeyhubError::NotAuthenticated => ErrorKind::Authentication,
			KeyhubError::AccessDenied { .. } => ErrorKind::Authorization,
			KeyhubError::ApiUrlNotSet | KeyhubError::InvalidConfig(_) => ErrorKind::Configuration,
			KeyhubError::InvalidArgument(_) => ErrorKind::InvalidArgument,
			KeyhubError::RequestFailed(_) | KeyhubError::ServerError { .. } => ErrorKind::Upstream,
			KeyhubError::ParseFailed(_) => ErrorKind::Parse,
		}
	}

	/// HTTP status attached to the error, when the server answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			KeyhubError::AuthenticationFailed { status, .. }
			| KeyhubError::ServerError { status, .. } => Some(*status),
			KeyhubError::RequestFailed(e) | KeyhubError::IdentityProviderUnreachable(e) => {
				e.status().map(|s| s.as_u16())
			}
			_ => None,
		}
	}

	pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
		Self::InvalidConfig(msg.into())
	}
}
