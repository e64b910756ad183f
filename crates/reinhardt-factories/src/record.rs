//! Generated records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One instance generated from a blueprint.
///
/// `pk` stays `None` until a store persists the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
	/// Blueprint name the record was generated from.
	pub model: String,

	/// Primary key assigned by the store.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pk: Option<Value>,

	/// Field values.
	pub fields: Map<String, Value>,
}

impl Record {
	/// Creates an unsaved record.
	pub fn new(model: impl Into<String>, fields: Map<String, Value>) -> Self {
		Self {
			model: model.into(),
			pk: None,
			fields,
		}
	}

	/// Returns a field value.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.fields.get(field)
	}

	/// Returns a string field value.
	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.fields.get(field).and_then(Value::as_str)
	}

	/// Returns true once a store has assigned a primary key.
	pub fn is_persisted(&self) -> bool {
		self.pk.is_some()
	}
}
