// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource operations on the tenant API, plus list filtering and paging.

mod grants;
mod users;

pub use users::{IDENTIFIER_SUBSTRING_FILTER, MIN_IDENTIFIER_SUBSTRING_LEN};

use crate::request::RequestOptions;

/// Caller-defined list filters, sent as query parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
	pairs: Vec<(String, String)>,
}

impl Filters {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a filter. A later value for the same key replaces every earlier
	/// one; use [`Filters::append`] for multi-valued filters.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		let key = key.into();
		let value = value.into();
		match self.pairs.iter().position(|(k, _)| *k == key) {
			Some(first) => {
				self.pairs[first].1 = value;
				let mut index = 0;
				self.pairs.retain(|(k, _)| {
					let keep = index <= first || *k != key;
					index += 1;
					keep
				});
			}
			None => self.pairs.push((key, value)),
		}
		self
	}

	/// Add a filter value, keeping earlier values for the same key. Each one
	/// is sent as its own `key=value` query pair.
	pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.pairs.push((key.into(), value.into()));
		self
	}

	/// First value for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.get_all(key).next()
	}

	/// Every value for `key`, in insertion order.
	pub fn get_all<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
		self
			.pairs
			.iter()
			.filter(move |(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K, V> FromIterator<(K, V)> for Filters
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		iter.into_iter().fold(Filters::new(), |f, (k, v)| f.with(k, v))
	}
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
	/// 1-based page number.
	pub page: u32,
	pub items_per_page: u32,
}

impl Pagination {
	pub const DEFAULT_PAGE: u32 = 1;
	pub const DEFAULT_ITEMS_PER_PAGE: u32 = 100;

	pub fn new(page: u32, items_per_page: u32) -> Self {
		Self {
			page,
			items_per_page,
		}
	}
}

impl Default for Pagination {
	fn default() -> Self {
		Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_ITEMS_PER_PAGE)
	}
}

/// Filters first, then `page` and `itemsPerPage`.
pub(crate) fn list_options(filters: &Filters, pagination: Pagination) -> RequestOptions {
	filters
		.iter()
		.fold(RequestOptions::new(), |options, (k, v)| options.query(k, v))
		.query("page", pagination.page)
		.query("itemsPerPage", pagination.items_per_page)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_filters_replace_duplicate_keys() {
		let filters = Filters::new()
			.with("identifierSubstring", "ali")
			.with("contextId", "4")
			.with("identifierSubstring", "alice");

		assert_eq!(filters.get("identifierSubstring"), Some("alice"));
		assert_eq!(filters.iter().count(), 2);
	}

	#[test]
	fn test_filters_append_keeps_every_value() {
		let filters = Filters::new()
			.append("contextId", "4")
			.append("contextId", "9")
			.with("userId", "7");

		let contexts: Vec<&str> = filters.get_all("contextId").collect();
		assert_eq!(contexts, vec!["4", "9"]);
		assert_eq!(filters.get("contextId"), Some("4"));

		let options = list_options(&filters, Pagination::default());
		let keys: Vec<&str> = options.query_pairs().iter().map(|(k, _)| k.as_str()).collect();
		assert_eq!(keys, vec!["contextId", "contextId", "userId", "page", "itemsPerPage"]);
	}

	#[test]
	fn test_with_collapses_appended_values() {
		let filters = Filters::new()
			.append("contextId", "4")
			.with("userId", "7")
			.append("contextId", "9")
			.with("contextId", "12");

		let pairs: Vec<(&str, &str)> = filters.iter().collect();
		assert_eq!(pairs, vec![("contextId", "12"), ("userId", "7")]);
	}

	#[test]
	fn test_filters_from_iter() {
		let filters: Filters = [("userId", "7")].into_iter().collect();
		assert_eq!(filters.get("userId"), Some("7"));
		assert!(!filters.is_empty());
	}

	#[test]
	fn test_pagination_defaults() {
		let p = Pagination::default();
		assert_eq!(p.page, 1);
		assert_eq!(p.items_per_page, 100);
	}

	#[test]
	fn test_list_options_appends_paging_after_filters() {
		let options = list_options(
			&Filters::new().with("identifierSubstring", "abc"),
			Pagination::new(3, 25),
		);
		assert_eq!(
			options.query_pairs(),
			&[
				("identifierSubstring".to_string(), "abc".to_string()),
				("page".to_string(), "3".to_string()),
				("itemsPerPage".to_string(), "25".to_string()),
			]
		);
	}
}
