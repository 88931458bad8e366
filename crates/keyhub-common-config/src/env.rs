// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment variable helpers.
//!
//! Secrets follow the `VAR` / `VAR_FILE` convention: when `VAR_FILE` is set
//! the secret is read from that path (Docker and Kubernetes secret mounts),
//! otherwise `VAR` is used directly.

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};

use keyhub_common_secret::SecretString;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum EnvError {
	/// A required variable is not set.
	#[error("missing environment variable: {var}")]
	Missing { var: String },

	/// A required secret is set through neither form.
	#[error("required secret not found: set either {var} or {file_var}")]
	MissingSecret { var: String, file_var: String },

	/// The `*_FILE` variable is set but empty.
	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },

	/// The secret file could not be read.
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A value is present but does not parse.
	#[error("invalid value for {var}: {message}")]
	Invalid { var: String, message: String },
}

/// Load an optional secret from `{var}_FILE` or `{var}`, in that order.
///
/// A single trailing newline is stripped from file content.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, EnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(EnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path_str);
		let content = fs::read_to_string(&path).map_err(|source| EnvError::Io {
			path: path.clone(),
			source,
		})?;

		tracing::debug!(var = %file_var, path = %path.display(), "loaded secret from file");
		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	Ok(env::var(var).ok().map(SecretString::new))
}

/// Like [`load_secret_env`] but fails when neither form is set.
pub fn require_secret_env(var: &str) -> Result<SecretString, EnvError> {
	load_secret_env(var)?.ok_or_else(|| EnvError::MissingSecret {
		var: var.to_string(),
		file_var: format!("{var}_FILE"),
	})
}

/// Read a required, non-secret variable.
pub fn require_env(var: &str) -> Result<String, EnvError> {
	env::var(var).map_err(|_| EnvError::Missing {
		var: var.to_string(),
	})
}

/// Read an optional, non-secret variable. Empty values count as unset.
pub fn optional_env(var: &str) -> Option<String> {
	env::var(var).ok().filter(|v| !v.is_empty())
}

/// Read and parse an optional variable.
pub fn optional_env_parsed<T>(var: &str) -> Result<Option<T>, EnvError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	optional_env(var)
		.map(|raw| {
			raw.trim().parse::<T>().map_err(|e| EnvError::Invalid {
				var: var.to_string(),
				message: e.to_string(),
			})
		})
		.transpose()
}
