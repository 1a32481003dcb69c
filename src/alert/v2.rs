//! alerts as served by `GET /api/v2/alerts`
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Extra;

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
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	#[serde(
		rename = "generatorURL",
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub generator_url: Option<Option<String>>,
	/// content hash assigned by the source alertmanager, never interpreted here
	pub fingerprint: String,
	pub status: Status,
	pub updated_at: DateTime<Utc>,
	/// fields we don't model (e.g. `receivers`), passed on as received
	#[serde(flatten)]
	pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::missing_docs_in_private_items)]
pub struct Status {
	pub inhibited_by: Vec<String>,
	pub silenced_by: Vec<String>,
	pub state: State,
	/// e.g. `mutedBy` of newer alertmanagers
	#[serde(flatten)]
	pub extra: Extra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
	Unprocessed,
	Active,
	Suppressed,
}
