// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tenant API resource types.
//!
//! Request bodies are built by the client. Response types are provided for
//! callers that want typed access; the client returns raw JSON and never
//! validates response shape, so convert with `serde_json::from_value`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::KeyhubError;

/// Wire format for grant validity timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of credential an identifier represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierType {
	Pin,
	#[default]
	RfidTag,
	LicencePlate,
}

impl IdentifierType {
	pub const ALL: [IdentifierType; 3] = [
		IdentifierType::Pin,
		IdentifierType::RfidTag,
		IdentifierType::LicencePlate,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			IdentifierType::Pin => "pin",
			IdentifierType::RfidTag => "rfid-tag",
			IdentifierType::LicencePlate => "licence-plate",
		}
	}
}

impl fmt::Display for IdentifierType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for IdentifierType {
	type Err = KeyhubError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		IdentifierType::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| {
				KeyhubError::invalid_argument(format!(
					"identifier type must be one of pin, rfid-tag, licence-plate; got {s:?}"
				))
			})
	}
}

/// A user of the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	/// Caller-chosen free text, unique per tenant by convention.
	pub identifier: String,
}

/// A credential bound to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
	#[serde(default)]
	pub id: Option<i64>,
	#[serde(default)]
	pub user_id: Option<i64>,
	#[serde(rename = "type")]
	pub identifier_type: IdentifierType,
	pub value: String,
}

/// Time-bounded access of a user to a context.
///
/// A missing `valid_from` means the grant is effective immediately; a
/// missing `valid_to` means it never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedAccess {
	pub id: i64,
	pub user_id: i64,
	pub context_id: i64,
	#[serde(rename = "expiry_time_start", default, with = "grant_time")]
	pub valid_from: Option<NaiveDateTime>,
	#[serde(rename = "expiry_time_end", default, with = "grant_time")]
	pub valid_to: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewUser<'a> {
	pub identifier: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewIdentifier<'a> {
	#[serde(rename = "type")]
	pub identifier_type: IdentifierType,
	pub value: &'a str,
}

/// Body shared by grant creation and update. Absent bounds are sent as
/// `null` so an update can clear a previously set window.
#[derive(Debug, Serialize)]
pub(crate) struct GrantBody {
	pub user_id: i64,
	#[serde(with = "grant_time")]
	pub expiry_time_start: Option<NaiveDateTime>,
	#[serde(with = "grant_time")]
	pub expiry_time_end: Option<NaiveDateTime>,
	pub context_id: i64,
}

impl GrantBody {
	pub fn new(
		context_id: i64,
		user_id: i64,
		valid_from: Option<NaiveDateTime>,
		valid_to: Option<NaiveDateTime>,
	) -> Self {
		Self {
			user_id,
			expiry_time_start: valid_from,
			expiry_time_end: valid_to,
			context_id,
		}
	}
}

/// `YYYY-MM-DD HH:MM:SS` on the way out; also accepts a `T` separator on the
/// way in.
mod grant_time {
	use chrono::NaiveDateTime;
	use serde::{Deserialize, Deserializer, Serializer};

	use super::TIMESTAMP_FORMAT;

	pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(ts) => serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let Some(raw) = Option::<String>::deserialize(deserializer)? else {
			return Ok(None);
		};
		NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
			.or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
			.map(Some)
			.map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use serde_json::json;

	fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d)
			.unwrap()
			.and_hms_opt(h, min, s)
			.unwrap()
	}

	#[test]
	fn test_identifier_type_wire_names() {
		assert_eq!(serde_json::to_value(IdentifierType::Pin).unwrap(), json!("pin"));
		assert_eq!(
			serde_json::to_value(IdentifierType::RfidTag).unwrap(),
			json!("rfid-tag")
		);
		assert_eq!(
			serde_json::to_value(IdentifierType::LicencePlate).unwrap(),
			json!("licence-plate")
		);
		assert_eq!(IdentifierType::default(), IdentifierType::RfidTag);
	}

	#[test]
	fn test_identifier_type_parse() {
		for t in IdentifierType::ALL {
			assert_eq!(t.as_str().parse::<IdentifierType>().unwrap(), t);
		}
		for bad in ["", "rfid", "RFID-TAG", "license-plate", "pin "] {
			let err = bad.parse::<IdentifierType>().unwrap_err();
			assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument, "{bad:?}");
		}
	}

	#[test]
	fn test_grant_body_field_order_and_format() {
		let body = GrantBody::new(
			12,
			7,
			Some(at(2025, 3, 1, 8, 0, 0)),
			Some(at(2025, 3, 31, 18, 30, 5)),
		);
		let encoded = serde_json::to_string(&body).unwrap();
		assert_eq!(
			encoded,
			r#"{"user_id":7,"expiry_time_start":"2025-03-01 08:00:00","expiry_time_end":"2025-03-31 18:30:05","context_id":12}"#
		);
	}

	#[test]
	fn test_grant_body_end_uses_valid_to() {
		let body = GrantBody::new(1, 2, Some(at(2025, 1, 1, 0, 0, 0)), Some(at(2026, 1, 1, 0, 0, 0)));
		let value = serde_json::to_value(&body).unwrap();
		assert_eq!(value["expiry_time_end"], json!("2026-01-01 00:00:00"));
		assert_ne!(value["expiry_time_start"], value["expiry_time_end"]);
	}

	#[test]
	fn test_grant_body_sends_open_bounds_as_null() {
		let value = serde_json::to_value(GrantBody::new(3, 4, None, None)).unwrap();
		assert_eq!(
			value,
			json!({"user_id": 4, "expiry_time_start": null, "expiry_time_end": null, "context_id": 3})
		);

		let encoded = serde_json::to_string(&GrantBody::new(3, 4, None, None)).unwrap();
		assert_eq!(
			encoded,
			r#"{"user_id":4,"expiry_time_start":null,"expiry_time_end":null,"context_id":3}"#
		);
	}

	#[test]
	fn test_granted_access_deserializes() {
		let grant: GrantedAccess = serde_json::from_value(json!({
			"id": 99,
			"user_id": 7,
			"context_id": 12,
			"expiry_time_start": "2025-03-01 08:00:00",
			"expiry_time_end": "2025-03-31T18:30:05"
		}))
		.unwrap();
		assert_eq!(grant.valid_from, Some(at(2025, 3, 1, 8, 0, 0)));
		assert_eq!(grant.valid_to, Some(at(2025, 3, 31, 18, 30, 5)));
	}

	#[test]
	fn test_granted_access_open_ended() {
		let grant: GrantedAccess = serde_json::from_value(json!({
			"id": 1,
			"user_id": 2,
			"context_id": 3,
			"expiry_time_end": null
		}))
		.unwrap();
		assert!(grant.valid_from.is_none());
		assert!(grant.valid_to.is_none());
	}

	#[test]
	fn test_user_and_identifier_deserialize() {
		let user: User = serde_json::from_value(json!({"id": 5, "identifier": "alice"})).unwrap();
		assert_eq!(user.identifier, "alice");

		let ident: IdentifierRecord =
			serde_json::from_value(json!({"type": "pin", "value": "1234"})).unwrap();
		assert_eq!(ident.identifier_type, IdentifierType::Pin);
		assert!(ident.user_id.is_none());
	}
}
