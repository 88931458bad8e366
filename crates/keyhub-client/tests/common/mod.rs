// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared mock identity provider and tenant API for integration tests.
//!
//! One `MockServer` plays both roles: the identity provider lives under
//! `/realms/...` and organization tenant APIs under `/org1/v1/api/` etc.

#![allow(dead_code)]

use keyhub_client::KeyhubClient;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REALM: &str = "tenants";
pub const TOKEN: &str = "test-access-token";
pub const TOKEN_PATH: &str = "/realms/tenants/protocol/openid-connect/token";
pub const ORGS_PATH: &str = "/realms/tenants/orgs/me";

pub fn client_for(server: &MockServer) -> KeyhubClient {
	KeyhubClient::builder()
		.auth_url(server.uri())
		.realm(REALM)
		.client_id("access-api")
		.username("operator")
		.password("pa55word")
		.build()
		.unwrap()
}

/// Tenant API base URL for `org` on the mock server.
pub fn org_api_url(server: &MockServer, org: &str) -> String {
	format!("{}/{org}/v1/api/", server.uri())
}

pub async fn mount_token(server: &MockServer) {
	Mock::given(method("POST"))
		.and(path(TOKEN_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": TOKEN,
			"token_type": "Bearer",
			"expires_in": 300
		})))
		.mount(server)
		.await;
}

/// Serve `orgs` from `orgs/me`, expecting exactly `expected_calls` requests.
pub async fn mount_organizations(server: &MockServer, orgs: Value, expected_calls: u64) {
	Mock::given(method("GET"))
		.and(path(ORGS_PATH))
		.and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
		.respond_with(ResponseTemplate::new(200).set_body_json(orgs))
		.expect(expected_calls)
		.mount(server)
		.await;
}

/// Organization map with a single `org1` whose API lives on the mock server.
pub fn single_org(server: &MockServer) -> Value {
	json!({ "org1": { "url": org_api_url(server, "org1"), "name": "Org One" } })
}

pub async fn authenticated_client(server: &MockServer) -> KeyhubClient {
	mount_token(server).await;
	let mut client = client_for(server);
	client.authenticate().await.unwrap();
	client
}

/// Client authenticated and bound to `org1`.
pub async fn scoped_client(server: &MockServer) -> KeyhubClient {
	mount_organizations(server, single_org(server), 1).await;
	let mut client = authenticated_client(server).await;
	client
		.set_api_url(org_api_url(server, "org1"))
		.await
		.unwrap();
	client
}
