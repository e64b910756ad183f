//! Suite-level coordination of the factory engine.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::FactoriesConfig;
use crate::definitions::{Blueprint, FieldGenerator};
use crate::dependency::{OrmDependency, PersistenceCapability};
use crate::engine::FactoryEngine;
use crate::error::{FactoryError, FactoryResult};
use crate::lifecycle::{SuiteHooks, SuiteSettings, TestInfo, TestScope};
use crate::record::Record;
use crate::stores::{RepositoryStore, Store, resolve_store};

/// Owns the factory engine for one test suite.
///
/// The host runner injects the ORM dependency, then calls
/// [`initialize_for_suite`](Self::initialize_for_suite) once and
/// [`after_test`](Self::after_test) after each test. Tests create records
/// through [`have`](Self::have), [`make`](Self::make) and
/// [`have_multiple`](Self::have_multiple).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_factories::prelude::*;
/// use serde_json::{Map, json};
///
/// struct ActiveRecordOrm;
///
/// impl OrmDependency for ActiveRecordOrm {
///     fn capability(&self) -> PersistenceCapability {
///         PersistenceCapability::ActiveRecord
///     }
///
///     fn cleanup(&self) -> bool {
///         false
///     }
/// }
///
/// let mut coordinator = FactoryCoordinator::new(FactoriesConfig::new());
/// coordinator.inject(Arc::new(ActiveRecordOrm));
/// coordinator.initialize_for_suite(SuiteSettings::new()).unwrap();
///
/// let mut fields = indexmap::IndexMap::new();
/// fields.insert("name".to_string(), FieldGenerator::value("gear"));
/// coordinator.define_model("Widget", fields).unwrap();
///
/// let widget = coordinator.have("Widget", &Map::new()).unwrap();
/// assert!(widget.is_persisted());
///
/// coordinator.after_test(&TestInfo::new("doc")).unwrap();
/// assert_eq!(coordinator.engine().unwrap().saved_count(), 0);
/// ```
pub struct FactoryCoordinator {
	config: FactoriesConfig,
	dependency: Option<Arc<dyn OrmDependency>>,
	capability: Option<PersistenceCapability>,
	settings: SuiteSettings,
	store: Option<Arc<dyn Store>>,
	engine: Option<FactoryEngine>,
}

impl FactoryCoordinator {
	/// Creates an uninitialized coordinator.
	pub fn new(config: FactoriesConfig) -> Self {
		Self {
			config,
			dependency: None,
			capability: None,
			settings: SuiteSettings::new(),
			store: None,
			engine: None,
		}
	}

	/// Current configuration.
	pub fn config(&self) -> &FactoriesConfig {
		&self.config
	}

	/// Settings passed to the last suite initialization.
	pub fn settings(&self) -> &SuiteSettings {
		&self.settings
	}

	/// Injects the ORM dependency and records its persistence capability.
	pub fn inject(&mut self, dependency: Arc<dyn OrmDependency>) {
		let capability = dependency.capability();
		tracing::debug!(?capability, "Injected ORM dependency");
		self.capability = Some(capability);
		self.dependency = Some(dependency);
	}

	/// Returns true once an engine is active.
	pub fn is_initialized(&self) -> bool {
		self.engine.is_some()
	}

	/// The active engine.
	pub fn engine(&self) -> FactoryResult<&FactoryEngine> {
		self.engine.as_ref().ok_or(FactoryError::NotInitialized)
	}

	fn engine_mut(&mut self) -> FactoryResult<&mut FactoryEngine> {
		self.engine.as_mut().ok_or(FactoryError::NotInitialized)
	}

	/// The store adapter selected for this suite, if any.
	///
	/// `None` means the engine persists through its default store.
	pub fn store_adapter(&self) -> Option<&Arc<dyn Store>> {
		self.store.as_ref()
	}

	/// Builds a fresh store and engine and loads the configured definitions.
	///
	/// Any engine from an earlier call is discarded first, so a failure
	/// before the new engine exists leaves the coordinator uninitialized.
	///
	/// Definition sources are loaded in order. If one fails to resolve, the
	/// error is returned and sources before it stay loaded.
	///
	/// # Errors
	///
	/// - [`FactoryError::MissingDependency`] if nothing was injected
	/// - [`FactoryError::UnknownStore`] if `customStore` is not registered
	/// - [`FactoryError::InvalidFactoriesPath`] if a source does not exist
	pub fn initialize_for_suite(&mut self, settings: SuiteSettings) -> FactoryResult<()> {
		// The previous engine is never reused, even when this call fails
		self.engine = None;
		self.store = None;

		if self.dependency.is_none() {
			return Err(FactoryError::MissingDependency(
				"an ORM dependency must be injected before the suite starts".to_string(),
			));
		}

		let store = self.build_store_adapter()?;
		self.settings = settings;
		self.store = store.clone();
		let engine = self.engine.insert(FactoryEngine::new(store));

		for path in &self.config.factories {
			let resolved = self.config.resolve_factory_path(path)?;
			engine.load_definitions(&resolved)?;
		}

		tracing::info!(
			store = engine.store().name(),
			definitions = engine.definition_names().len(),
			"Factories initialized"
		);
		Ok(())
	}

	/// Selects the store adapter for a new suite.
	///
	/// The first match wins: the configured custom store, then a repository
	/// store over a data-mapper dependency's entity manager, then none.
	pub fn build_store_adapter(&self) -> FactoryResult<Option<Arc<dyn Store>>> {
		if let Some(name) = &self.config.custom_store {
			let store = resolve_store(name)?;
			tracing::debug!(custom_store = %name, store = store.name(), "Using custom store");
			return Ok(Some(store));
		}

		if let Some(PersistenceCapability::DataMapper(manager)) = &self.capability {
			tracing::debug!("Using repository store");
			return Ok(Some(Arc::new(RepositoryStore::new(manager.clone()))));
		}

		Ok(None)
	}

	/// Declares a blueprint on the active engine.
	pub fn define_model(
		&mut self,
		name: impl Into<String>,
		fields: IndexMap<String, FieldGenerator>,
	) -> FactoryResult<Blueprint> {
		self.engine_mut()?.define(name, fields)
	}

	/// Generates, persists, and registers one record for cleanup.
	pub fn create_and_persist(
		&mut self,
		name: &str,
		overrides: &Map<String, Value>,
	) -> FactoryResult<Record> {
		self.engine_mut()?.create(name, overrides)
	}

	/// Generates one record without persisting it.
	pub fn create_transient(
		&mut self,
		name: &str,
		overrides: &Map<String, Value>,
	) -> FactoryResult<Record> {
		self.engine_mut()?.instance(name, overrides)
	}

	/// Creates `count` persisted records with the same overrides, in order.
	pub fn create_many(
		&mut self,
		name: &str,
		count: usize,
		overrides: &Map<String, Value>,
	) -> FactoryResult<Vec<Record>> {
		let engine = self.engine_mut()?;
		(0..count).map(|_| engine.create(name, overrides)).collect()
	}

	/// Alias of [`create_and_persist`](Self::create_and_persist).
	pub fn have(&mut self, name: &str, overrides: &Map<String, Value>) -> FactoryResult<Record> {
		self.create_and_persist(name, overrides)
	}

	/// Alias of [`create_transient`](Self::create_transient).
	pub fn make(&mut self, name: &str, overrides: &Map<String, Value>) -> FactoryResult<Record> {
		self.create_transient(name, overrides)
	}

	/// Alias of [`create_many`](Self::create_many).
	pub fn have_multiple(
		&mut self,
		name: &str,
		count: usize,
		overrides: &Map<String, Value>,
	) -> FactoryResult<Vec<Record>> {
		self.create_many(name, count, overrides)
	}

	/// Decides whether records created during `test` are deleted.
	///
	/// Cleanup is skipped when the configuration sets `cleanup: false`, or
	/// else when the dependency reports its own cleanup as enabled. The
	/// dependency is asked on every call.
	pub fn after_test(&mut self, test: &TestInfo) -> FactoryResult<()> {
		if self.config.cleanup_disabled() {
			tracing::debug!(test = test.name(), "Cleanup disabled by configuration");
			return Ok(());
		}

		if let Some(dependency) = &self.dependency
			&& dependency.cleanup()
		{
			tracing::debug!(test = test.name(), "Cleanup left to the ORM dependency");
			return Ok(());
		}

		let Some(engine) = self.engine.as_mut() else {
			return Ok(());
		};
		let deleted = engine.delete_saved()?;
		tracing::debug!(test = test.name(), deleted, "Deleted factory records");
		Ok(())
	}

	/// Flushes the current suite's records, then rebuilds everything from
	/// `config`.
	///
	/// The project root carries over when `config` does not set one.
	pub fn on_reconfigure(
		&mut self,
		mut config: FactoriesConfig,
		settings: SuiteSettings,
	) -> FactoryResult<()> {
		self.after_test(&TestInfo::new("reconfigure"))?;

		if config.root.is_none() {
			config.root = self.config.root.take();
		}
		self.config = config;
		self.initialize_for_suite(settings)
	}

	/// Opens a [`TestScope`] that runs [`after_test`](Self::after_test) when
	/// the test ends.
	pub fn scope(&mut self, test: impl Into<String>) -> TestScope<'_, Self> {
		TestScope::begin(self, TestInfo::new(test))
	}
}

impl SuiteHooks for FactoryCoordinator {
	fn before_suite(&mut self, settings: SuiteSettings) -> FactoryResult<()> {
		self.initialize_for_suite(settings)
	}

	fn after_test(&mut self, test: &TestInfo) -> FactoryResult<()> {
		FactoryCoordinator::after_test(self, test)
	}

	fn reconfigure(
		&mut self,
		config: FactoriesConfig,
		settings: SuiteSettings,
	) -> FactoryResult<()> {
		self.on_reconfigure(config, settings)
	}
}

impl std::fmt::Debug for FactoryCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FactoryCoordinator")
			.field("config", &self.config)
			.field("capability", &self.capability)
			.field("engine", &self.engine)
			.finish_non_exhaustive()
	}
}
