// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Keyhub SDK.
//!
//! Every request the SDK sends, to the identity provider or to a tenant API,
//! goes through a client built here so the `User-Agent` header is consistent.

mod client;

pub use client::{build_client, builder, user_agent};
