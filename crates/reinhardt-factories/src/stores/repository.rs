//! Repository-backed store for data-mapper ORMs.

use std::sync::Arc;

use super::Store;
use crate::error::FactoryResult;
use crate::record::Record;

/// Unit-of-work handle exposed by a data-mapper ORM.
///
/// Changes staged with `persist` and `remove` reach the database on `flush`.
pub trait EntityManager: Send + Sync {
	/// Stages a new record and assigns its primary key.
	fn persist(&self, record: &mut Record) -> FactoryResult<()>;

	/// Stages removal of a record.
	fn remove(&self, record: &Record) -> FactoryResult<()>;

	/// Writes staged changes.
	fn flush(&self) -> FactoryResult<()>;
}

/// Store that saves through an [`EntityManager`], flushing after every
/// change.
pub struct RepositoryStore {
	manager: Arc<dyn EntityManager>,
}

impl RepositoryStore {
	/// Wraps an entity manager.
	pub fn new(manager: Arc<dyn EntityManager>) -> Self {
		Self { manager }
	}

	/// Returns the wrapped entity manager.
	pub fn manager(&self) -> &Arc<dyn EntityManager> {
		&self.manager
	}
}

impl std::fmt::Debug for RepositoryStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RepositoryStore").finish_non_exhaustive()
	}
}

impl Store for RepositoryStore {
	fn name(&self) -> &str {
		"repository"
	}

	fn save(&self, record: &mut Record) -> FactoryResult<()> {
		self.manager.persist(record)?;
		self.manager.flush()
	}

	fn delete(&self, record: &Record) -> FactoryResult<()> {
		self.manager.remove(record)?;
		self.manager.flush()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FactoryError;
	use parking_lot::Mutex;
	use rstest::rstest;
	use serde_json::{Map, json};

	#[derive(Default)]
	struct RecordingManager {
		calls: Mutex<Vec<String>>,
		fail_flush: bool,
	}

	impl EntityManager for RecordingManager {
		fn persist(&self, record: &mut Record) -> FactoryResult<()> {
			record.pk = Some(json!(7));
			self.calls.lock().push(format!("persist {}", record.model));
			Ok(())
		}

		fn remove(&self, record: &Record) -> FactoryResult<()> {
			self.calls.lock().push(format!("remove {}", record.model));
			Ok(())
		}

		fn flush(&self) -> FactoryResult<()> {
			self.calls.lock().push("flush".to_string());
			if self.fail_flush {
				return Err(FactoryError::Store("connection lost".to_string()));
			}
			Ok(())
		}
	}

	#[rstest]
	fn test_save_persists_then_flushes() {
		let manager = Arc::new(RecordingManager::default());
		let store = RepositoryStore::new(manager.clone());
		let mut record = Record::new("Widget", Map::new());

		store.save(&mut record).unwrap();
		store.delete(&record).unwrap();

		assert_eq!(record.pk, Some(json!(7)));
		assert_eq!(
			*manager.calls.lock(),
			vec!["persist Widget", "flush", "remove Widget", "flush"]
		);
	}

	#[rstest]
	fn test_flush_failure_propagates() {
		let manager = Arc::new(RecordingManager {
			fail_flush: true,
			..Default::default()
		});
		let store = RepositoryStore::new(manager);
		let mut record = Record::new("Widget", Map::new());

		let result = store.save(&mut record);
		assert!(matches!(result, Err(FactoryError::Store(message)) if message == "connection lost"));
	}
}
