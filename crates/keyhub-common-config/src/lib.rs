// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by the Keyhub crates.
//!
//! - [`Secret`] / [`SecretString`], re-exported from `keyhub-common-secret`
//! - [`env`] helpers that read plain values and secrets from the process
//!   environment, with `*_FILE` support for mounted secrets

pub mod env;

pub use keyhub_common_secret::{Secret, SecretString, REDACTED};

pub use env::{
	load_secret_env, optional_env, optional_env_parsed, require_env, require_secret_env, EnvError,
};
