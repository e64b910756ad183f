//! Blueprints and field generators.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::FakerType;
use crate::error::{FactoryError, FactoryResult};

/// How a single blueprint field gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldGenerator {
	/// Fixed value, cloned into every record.
	Value(Value),
	/// Fresh fake value per record.
	Faker(FakerType),
	/// Counter-based value; `{n}` in the pattern is replaced by the counter.
	Sequence(String),
}

impl FieldGenerator {
	/// Shorthand for a literal field.
	pub fn value(value: impl Into<Value>) -> Self {
		Self::Value(value.into())
	}

	/// Shorthand for a sequence field.
	pub fn sequence(pattern: impl Into<String>) -> Self {
		Self::Sequence(pattern.into())
	}

	/// Interprets a field entry from a definition file.
	///
	/// Single-key objects `{faker: ..}`, `{sequence: ..}` and `{value: ..}`
	/// are generators. Anything else is a literal.
	pub fn from_value(value: Value) -> FactoryResult<Self> {
		let (key, inner) = match &value {
			Value::Object(map) if map.len() == 1 => match map.iter().next() {
				Some((key, inner)) => (key.clone(), inner.clone()),
				None => return Ok(Self::Value(value)),
			},
			_ => return Ok(Self::Value(value)),
		};

		match key.as_str() {
			"faker" => {
				let name = inner.as_str().ok_or_else(|| {
					FactoryError::ParseError("'faker' expects a string".to_string())
				})?;
				Ok(Self::Faker(name.parse()?))
			}
			"sequence" => {
				let pattern = inner.as_str().ok_or_else(|| {
					FactoryError::ParseError("'sequence' expects a string".to_string())
				})?;
				Ok(Self::Sequence(pattern.to_string()))
			}
			"value" => Ok(Self::Value(inner)),
			_ => Ok(Self::Value(value)),
		}
	}
}

impl From<FakerType> for FieldGenerator {
	fn from(kind: FakerType) -> Self {
		Self::Faker(kind)
	}
}

/// Per-engine counters backing [`FieldGenerator::Sequence`].
#[derive(Debug, Default)]
pub struct Sequences {
	counters: HashMap<(String, String), u64>,
}

impl Sequences {
	/// Creates an empty counter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances and returns the counter for a blueprint field, starting at 1.
	pub fn next(&mut self, model: &str, field: &str) -> u64 {
		let counter = self
			.counters
			.entry((model.to_string(), field.to_string()))
			.or_insert(0);
		*counter += 1;
		*counter
	}
}

/// A named template describing how to generate a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
	/// Blueprint name.
	pub name: String,
	/// Field generators keyed by field name.
	pub fields: IndexMap<String, FieldGenerator>,
}

impl Blueprint {
	/// Creates a blueprint.
	pub fn new(name: impl Into<String>, fields: IndexMap<String, FieldGenerator>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}

	/// Builds a blueprint from a definition-file mapping.
	pub fn from_value(name: impl Into<String>, value: Value) -> FactoryResult<Self> {
		let name = name.into();
		let Value::Object(map) = value else {
			return Err(FactoryError::ParseError(format!(
				"Definition '{}' must map field names to values",
				name
			)));
		};

		let mut fields = IndexMap::with_capacity(map.len());
		for (field, entry) in map {
			let generator = FieldGenerator::from_value(entry).map_err(|e| match e {
				FactoryError::ParseError(message) => {
					FactoryError::ParseError(format!("{}.{}: {}", name, field, message))
				}
				other => other,
			})?;
			fields.insert(field, generator);
		}
		Ok(Self::new(name, fields))
	}

	/// Generates field values and applies `overrides` on top.
	///
	/// Overrides may introduce fields the blueprint does not declare.
	pub fn generate(
		&self,
		sequences: &mut Sequences,
		overrides: &Map<String, Value>,
	) -> Map<String, Value> {
		let mut fields = Map::new();
		for (field, generator) in &self.fields {
			if overrides.contains_key(field) {
				continue;
			}
			let value = match generator {
				FieldGenerator::Value(value) => value.clone(),
				FieldGenerator::Faker(kind) => kind.generate(),
				FieldGenerator::Sequence(pattern) => {
					let n = sequences.next(&self.name, field);
					Value::String(pattern.replace("{n}", &n.to_string()))
				}
			};
			fields.insert(field.clone(), value);
		}
		for (field, value) in overrides {
			fields.insert(field.clone(), value.clone());
		}
		fields
	}
}
