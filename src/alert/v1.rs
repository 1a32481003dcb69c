//! alerts as served by `GET /api/v1/alerts`
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Extra;

/// optional fields are `None` when absent and `Some(None)` when `null`, so
/// both survive re-encoding
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::missing_docs_in_private_items)]
pub struct Alert {
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub annotations: Option<Option<IndexMap<String, String>>>,
	pub labels: IndexMap<String, String>,
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub starts_at: Option<Option<DateTime<Utc>>>,
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub ends_at: Option<Option<DateTime<Utc>>>,
	#[serde(
		rename = "generatorURL",
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub generator_url: Option<Option<String>>,
	/// fields we don't model, passed on as received
	#[serde(flatten)]
	pub extra: Extra,
}

/// response body of the v1 api
#[derive(Debug, Deserialize)]
pub(super) struct Envelope {
	/// `null` and a missing field both mean no alerts
	#[serde(default)]
	pub data: Option<Vec<Alert>>,
}
