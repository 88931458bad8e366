// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Keyhub multi-tenant access-control API.
//!
//! The client authenticates against an identity provider, discovers the
//! organizations (tenants) the user belongs to, and is then bound to one
//! tenant API URL. The binding is only accepted when the URL lies under one
//! of the user's organizations. After that it manages users, identifiers
//! (PIN, RFID tag, licence plate) and granted accesses to contexts.
//!
//! # Flow
//!
//! 1. **Authenticate**: OAuth password grant against the realm's token
//!    endpoint; the bearer token is kept on the client.
//! 2. **Resolve organizations**: one call to the provider's `orgs/me`
//!    operation, memoized for the lifetime of the client.
//! 3. **Bind the tenant**: [`KeyhubClient::set_api_url`] checks the URL
//!    against the organization URLs (string prefix) and rejects anything else.
//! 4. **Call resources**: every call is sent to `{api_url}{path}` with the
//!    bearer token. Calls made before step 3 fail without touching the network.
//!
//! # Example
//!
//! ```ignore
//! use keyhub_client::{ClientConfig, IdentifierType, KeyhubClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = KeyhubClient::new(ClientConfig::from_env()?)?;
//!     client.authenticate().await?;
//!
//!     let orgs = client.get_organizations().await?;
//!     let api_url = orgs.url_of("org1").unwrap_or_default().to_string();
//!     client.set_api_url(api_url).await?;
//!
//!     let user = client.create_user("alice").await?;
//!     let user_id = user["id"].as_i64().unwrap_or_default();
//!     client
//!         .create_identifier(user_id, "04A2B9C1", IdentifierType::RfidTag)
//!         .await?;
//!     client.create_granted_access(12, user_id, None, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every failure is a [`KeyhubError`]; [`KeyhubError::kind`] groups variants
//! into authentication, authorization, configuration, invalid argument,
//! upstream and parse errors. Nothing is retried.

mod auth;
mod client;
pub mod config;
mod error;
pub mod models;
mod organizations;
mod request;
mod resources;

pub use auth::AccessToken;
pub use client::{KeyhubClient, KeyhubClientBuilder};
pub use config::ClientConfig;
pub use error::{ErrorKind, KeyhubError, Result};
pub use models::{GrantedAccess, IdentifierRecord, IdentifierType, User, TIMESTAMP_FORMAT};
pub use organizations::{Organization, Organizations};
pub use request::RequestOptions;
pub use resources::{Filters, Pagination, IDENTIFIER_SUBSTRING_FILTER, MIN_IDENTIFIER_SUBSTRING_LEN};

pub use keyhub_common_config::SecretString;
pub use reqwest::Method;
