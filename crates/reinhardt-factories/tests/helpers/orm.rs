//! ORM double that records every persistence call.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use reinhardt_factories::prelude::*;
use serde_json::json;

/// Entity manager keeping rows in a map and logging calls.
#[derive(Default)]
pub struct RecordingEntityManager {
	rows: Mutex<BTreeMap<u64, String>>,
	calls: Mutex<Vec<String>>,
	next_pk: Mutex<u64>,
}

impl RecordingEntityManager {
	/// Number of flushed rows.
	pub fn row_count(&self) -> usize {
		self.rows.lock().len()
	}

	/// Calls received so far, e.g. `persist Widget`, `flush`.
	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	/// Number of `remove` calls received.
	pub fn remove_count(&self) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|call| call.starts_with("remove"))
			.count()
	}
}

impl EntityManager for RecordingEntityManager {
	fn persist(&self, record: &mut Record) -> FactoryResult<()> {
		let mut next_pk = self.next_pk.lock();
		*next_pk += 1;
		record.pk = Some(json!(*next_pk));
		self.rows.lock().insert(*next_pk, record.model.clone());
		self.calls.lock().push(format!("persist {}", record.model));
		Ok(())
	}

	fn remove(&self, record: &Record) -> FactoryResult<()> {
		let pk = record
			.pk
			.as_ref()
			.and_then(|pk| pk.as_u64())
			.ok_or_else(|| FactoryError::Store("record has no pk".to_string()))?;
		self.rows
			.lock()
			.remove(&pk)
			.ok_or_else(|| FactoryError::Store(format!("row {} does not exist", pk)))?;
		self.calls.lock().push(format!("remove {}", record.model));
		Ok(())
	}

	fn flush(&self) -> FactoryResult<()> {
		self.calls.lock().push("flush".to_string());
		Ok(())
	}
}

/// ORM dependency with a switchable cleanup flag.
pub struct TestOrm {
	manager: Option<Arc<RecordingEntityManager>>,
	cleanup: AtomicBool,
}

impl TestOrm {
	/// Active-record style ORM.
	pub fn active_record(cleanup: bool) -> Arc<Self> {
		Arc::new(Self {
			manager: None,
			cleanup: AtomicBool::new(cleanup),
		})
	}

	/// Data-mapper style ORM backed by `manager`.
	pub fn data_mapper(manager: Arc<RecordingEntityManager>, cleanup: bool) -> Arc<Self> {
		Arc::new(Self {
			manager: Some(manager),
			cleanup: AtomicBool::new(cleanup),
		})
	}

	/// Changes the cleanup flag reported from now on.
	pub fn set_cleanup(&self, cleanup: bool) {
		self.cleanup.store(cleanup, Ordering::SeqCst);
	}
}

impl OrmDependency for TestOrm {
	fn capability(&self) -> PersistenceCapability {
		match &self.manager {
			Some(manager) => PersistenceCapability::DataMapper(manager.clone()),
			None => PersistenceCapability::ActiveRecord,
		}
	}

	fn cleanup(&self) -> bool {
		self.cleanup.load(Ordering::SeqCst)
	}
}
