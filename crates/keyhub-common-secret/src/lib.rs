// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for credentials handled by the Keyhub SDK.
//!
//! The SDK holds two kinds of sensitive material: the account password used
//! for the password grant, and the bearer token returned by the identity
//! provider. Both are stored as [`SecretString`] so that they:
//!
//! - print as `[REDACTED]` through `Debug` and `Display`, including inside
//!   `tracing` fields,
//! - serialize as `"[REDACTED]"` when a config struct is dumped,
//! - are zeroized when dropped,
//! - can only be read through an explicit [`Secret::expose`] call.
//!
//! ```
//! use keyhub_common_secret::SecretString;
//!
//! let password = SecretString::new("hunter2".to_string());
//! assert_eq!(format!("{password}"), "[REDACTED]");
//! assert_eq!(password.expose(), "hunter2");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed in place of any secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never be logged or serialized in clear text.
///
/// There is no `Deref`; reading the value requires [`Secret::expose`], which
/// keeps every access visible at the call site.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// The common case: a secret string such as a password or access token.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the wrapped value.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the wrapped string is empty. Lets config validation check
	/// presence without exposing the value.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	// Token responses and config files deserialize straight into a secret.
	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_hide_the_password() {
		let password = SecretString::from("correct-horse-battery");

		let debug = format!("{password:?}");
		let display = format!("{password}");

		assert!(!debug.contains("correct-horse-battery"));
		assert_eq!(debug, "Secret(\"[REDACTED]\")");
		assert_eq!(display, REDACTED);
	}

	#[test]
	fn expose_returns_the_token() {
		let token = SecretString::new("eyJhbGciOi".to_string());
		assert_eq!(token.expose(), "eyJhbGciOi");
	}

	#[test]
	fn is_empty_checks_without_exposing() {
		assert!(SecretString::from("").is_empty());
		assert!(!SecretString::from("x").is_empty());
	}

	#[test]
	fn struct_holding_a_secret_stays_redacted() {
		#[derive(Debug)]
		#[allow(dead_code)]
		struct Credentials {
			username: String,
			password: SecretString,
		}

		let creds = Credentials {
			username: "operator".to_string(),
			password: SecretString::from("pa55word"),
		};
		let debug = format!("{creds:?}");

		assert!(debug.contains("operator"));
		assert!(!debug.contains("pa55word"));
	}

	#[test]
	fn clones_compare_equal() {
		let token = SecretString::from("abc");
		assert_eq!(token.clone(), token);
		assert_ne!(token, SecretString::from("abd"));
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serialize_writes_placeholder() {
		let json = serde_json::to_string(&SecretString::from("pa55word")).unwrap();
		assert_eq!(json, "\"[REDACTED]\"");
	}

	#[cfg(feature = "serde")]
	#[test]
	fn deserialize_wraps_value() {
		#[derive(serde::Deserialize)]
		struct TokenBody {
			access_token: SecretString,
		}

		let body: TokenBody = serde_json::from_str(r#"{"access_token":"tok-123"}"#).unwrap();
		assert_eq!(body.access_token.expose(), "tok-123");
	}

	proptest! {
		#[test]
		fn formatting_never_leaks(inner in "[a-zA-Z0-9_.~+/-]{4,64}") {
			prop_assume!(!REDACTED.contains(&inner));
			prop_assume!(!"Secret".contains(&inner));

			let secret = SecretString::new(inner.clone());
			let debug = format!("{secret:?}");
			let display = format!("{secret}");
			prop_assert!(!debug.contains(&inner));
			prop_assert!(!display.contains(&inner));
		}
	}
}
