//! data structures for the alerts we pull from the source and push to the
//! destination alertmanager
//!
//! Alerts are decoded only to check their shape. Whatever was received is
//! encoded again field for field, unknown fields included.
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::settings::PayloadShape;

pub mod v1;
pub mod v2;

/// wire fields of an alert that aren't modeled explicitly
pub type Extra = IndexMap<String, Value>;

/// the alerts of one relay cycle
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertBatch {
	V1(Vec<v1::Alert>),
	V2(Vec<v2::Alert>),
}

impl AlertBatch {
	/// decodes a source response body. v1 bodies wrap the alerts in a `data`
	/// field, v2 bodies are a bare array.
	pub fn decode(shape: PayloadShape, body: &[u8]) -> Result<Self, serde_json::Error> {
		Ok(match shape {
			PayloadShape::V1 => {
				// derived structs would accept a sequence as well
				let object: serde_json::Map<String, Value> = serde_json::from_slice(body)?;
				let envelope: v1::Envelope = serde_json::from_value(Value::Object(object))?;
				Self::V1(envelope.data.unwrap_or_default())
			}
			PayloadShape::V2 => Self::V2(serde_json::from_slice(body)?),
		})
	}

	pub fn len(&self) -> usize {
		match self {
			Self::V1(alerts) => alerts.len(),
			Self::V2(alerts) => alerts.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
