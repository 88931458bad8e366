// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with the standard Keyhub User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

const SDK_NAME: &str = "keyhub-sdk";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a client builder preconfigured with the Keyhub User-Agent.
///
/// Use this when the caller needs further customization before `build()`.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client, applying `timeout` to every request when set.
///
/// No retry or pooling policy is layered on top; whatever reqwest provides
/// is what callers get.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
	let mut builder = builder();
	if let Some(timeout) = timeout {
		tracing::debug!(timeout_ms = timeout.as_millis() as u64, "configuring request timeout");
		builder = builder.timeout(timeout);
	}
	builder.build()
}

/// Returns the User-Agent string sent with every SDK request.
///
/// Format: `keyhub-sdk/{version} ({os}-{arch})`
/// Example: `keyhub-sdk/0.1.0 (linux-x86_64)`
pub fn user_agent() -> String {
	format!(
		"{SDK_NAME}/{SDK_VERSION} ({}-{})",
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
