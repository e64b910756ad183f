//! Default in-process store.

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use super::Store;
use crate::error::{FactoryError, FactoryResult};
use crate::record::Record;

#[derive(Debug, Default)]
struct Inner {
	next_pk: u64,
	rows: IndexMap<(String, u64), Map<String, Value>>,
}

/// Keeps saved records in memory.
///
/// Primary keys are integers starting at 1 and are never reused within one
/// store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
	inner: Mutex<Inner>,
}

impl InMemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored records.
	pub fn len(&self) -> usize {
		self.inner.lock().rows.len()
	}

	/// Returns true if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.inner.lock().rows.is_empty()
	}

	/// Returns the stored fields of a record.
	pub fn get(&self, model: &str, pk: u64) -> Option<Map<String, Value>> {
		self.inner
			.lock()
			.rows
			.get(&(model.to_string(), pk))
			.cloned()
	}

	/// Returns true if the record is currently stored.
	pub fn contains(&self, record: &Record) -> bool {
		match record.pk.as_ref().and_then(Value::as_u64) {
			Some(pk) => self
				.inner
				.lock()
				.rows
				.contains_key(&(record.model.clone(), pk)),
			None => false,
		}
	}
}

impl Store for InMemoryStore {
	fn name(&self) -> &str {
		"memory"
	}

	fn save(&self, record: &mut Record) -> FactoryResult<()> {
		let mut inner = self.inner.lock();
		inner.next_pk += 1;
		let pk = inner.next_pk;
		inner
			.rows
			.insert((record.model.clone(), pk), record.fields.clone());
		record.pk = Some(json!(pk));
		Ok(())
	}

	fn delete(&self, record: &Record) -> FactoryResult<()> {
		let pk = record.pk.as_ref().and_then(Value::as_u64).ok_or_else(|| {
			FactoryError::Store(format!("{} record has no primary key", record.model))
		})?;

		self.inner
			.lock()
			.rows
			.shift_remove(&(record.model.clone(), pk))
			.map(|_| ())
			.ok_or_else(|| FactoryError::Store(format!("{}#{} is not stored", record.model, pk)))
	}
}
