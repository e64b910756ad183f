//! The factory engine: blueprints, record generation, and the registry of
//! records created since the last cleanup.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::definitions::{Blueprint, DefinitionLoader, FieldGenerator, Sequences};
use crate::error::{FactoryError, FactoryResult};
use crate::record::Record;
use crate::stores::{InMemoryStore, Store};

/// Generates records from blueprints and persists them through a store.
///
/// Every record returned by [`create`](Self::create) is remembered until
/// [`delete_saved`](Self::delete_saved) removes it again.
pub struct FactoryEngine {
	store: Arc<dyn Store>,
	definitions: IndexMap<String, Blueprint>,
	sequences: Sequences,
	saved: Vec<Record>,
}

impl FactoryEngine {
	/// Creates an engine bound to `store`, or to a fresh [`InMemoryStore`]
	/// when none is given.
	pub fn new(store: Option<Arc<dyn Store>>) -> Self {
		Self {
			store: store.unwrap_or_else(|| Arc::new(InMemoryStore::new())),
			definitions: IndexMap::new(),
			sequences: Sequences::new(),
			saved: Vec::new(),
		}
	}

	/// Returns the store records are persisted through.
	pub fn store(&self) -> &Arc<dyn Store> {
		&self.store
	}

	/// Declares a blueprint.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::DefinitionExists`] if `name` is already
	/// declared; the existing blueprint is left untouched.
	pub fn define(
		&mut self,
		name: impl Into<String>,
		fields: IndexMap<String, FieldGenerator>,
	) -> FactoryResult<Blueprint> {
		self.define_blueprint(Blueprint::new(name, fields))
	}

	/// Declares a prepared blueprint.
	pub fn define_blueprint(&mut self, blueprint: Blueprint) -> FactoryResult<Blueprint> {
		if self.definitions.contains_key(&blueprint.name) {
			return Err(FactoryError::DefinitionExists(blueprint.name));
		}
		self.definitions
			.insert(blueprint.name.clone(), blueprint.clone());
		Ok(blueprint)
	}

	/// Loads blueprints from a definition file or directory.
	///
	/// Every file is parsed before any blueprint is declared, so a parse
	/// failure leaves the engine unchanged. Returns the number of blueprints
	/// declared.
	pub fn load_definitions(&mut self, path: &Path) -> FactoryResult<usize> {
		let blueprints = DefinitionLoader::new().load_path(path)?;
		let count = blueprints.len();
		for blueprint in blueprints {
			self.define_blueprint(blueprint)?;
		}
		tracing::debug!(path = %path.display(), count, "Loaded factory definitions");
		Ok(count)
	}

	/// Returns true if `name` is declared.
	pub fn has_definition(&self, name: &str) -> bool {
		self.definitions.contains_key(name)
	}

	/// Returns a declared blueprint.
	pub fn definition(&self, name: &str) -> Option<&Blueprint> {
		self.definitions.get(name)
	}

	/// Declared blueprint names in declaration order.
	pub fn definition_names(&self) -> Vec<&str> {
		self.definitions.keys().map(String::as_str).collect()
	}

	/// Generates a record without persisting or registering it.
	pub fn instance(&mut self, name: &str, overrides: &Map<String, Value>) -> FactoryResult<Record> {
		let blueprint = self
			.definitions
			.get(name)
			.ok_or_else(|| FactoryError::BlueprintNotFound(name.to_string()))?;
		let fields = blueprint.generate(&mut self.sequences, overrides);
		Ok(Record::new(name, fields))
	}

	/// Generates, persists, and registers a record for cleanup.
	pub fn create(&mut self, name: &str, overrides: &Map<String, Value>) -> FactoryResult<Record> {
		let mut record = self.instance(name, overrides)?;
		self.store.save(&mut record)?;
		self.saved.push(record.clone());
		Ok(record)
	}

	/// Records created since the last cleanup, in creation order.
	pub fn saved(&self) -> &[Record] {
		&self.saved
	}

	/// Number of records awaiting cleanup.
	pub fn saved_count(&self) -> usize {
		self.saved.len()
	}

	/// Deletes every registered record in creation order.
	///
	/// Stops at the first failing delete. Records deleted before the failure
	/// are forgotten; the failing record and everything after it stay
	/// registered.
	pub fn delete_saved(&mut self) -> FactoryResult<usize> {
		let mut deleted = 0;
		let mut failure = None;
		for record in &self.saved {
			if let Err(error) = self.store.delete(record) {
				failure = Some(error);
				break;
			}
			deleted += 1;
		}
		self.saved.drain(..deleted);

		match failure {
			Some(error) => {
				tracing::debug!(
					deleted,
					remaining = self.saved.len(),
					store = self.store.name(),
					"Cleanup aborted"
				);
				Err(error)
			}
			None => Ok(deleted),
		}
	}
}

impl std::fmt::Debug for FactoryEngine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FactoryEngine")
			.field("store", &self.store.name())
			.field("definitions", &self.definition_names())
			.field("saved", &self.saved.len())
			.finish()
	}
}
