//! Registry of custom stores, looked up by the `customStore` identifier.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::Store;
use crate::error::{FactoryError, FactoryResult};

/// Constructor registered with [`register_store_factory`].
pub type StoreFactoryFn = dyn Fn() -> FactoryResult<Arc<dyn Store>> + Send + Sync;

/// What a store identifier resolves to.
#[derive(Clone)]
pub enum StoreProvider {
	/// A ready store, used as-is.
	Instance(Arc<dyn Store>),
	/// A constructor invoked on every resolution.
	Factory(Arc<StoreFactoryFn>),
}

impl StoreProvider {
	/// Produces the store this provider stands for.
	pub fn into_store(self) -> FactoryResult<Arc<dyn Store>> {
		match self {
			Self::Instance(store) => Ok(store),
			Self::Factory(create) => create(),
		}
	}
}

impl std::fmt::Debug for StoreProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Instance(store) => f.debug_tuple("Instance").field(&store.name()).finish(),
			Self::Factory(_) => f.debug_tuple("Factory").finish(),
		}
	}
}

/// Global store registry.
static STORE_REGISTRY: Lazy<RwLock<HashMap<String, StoreProvider>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a store instance under `name`.
///
/// # Example
///
/// ```
/// use reinhardt_factories::stores::{InMemoryStore, has_store, register_store};
///
/// register_store("docs.MemoryStore", InMemoryStore::new());
/// assert!(has_store("docs.MemoryStore"));
/// ```
pub fn register_store<S: Store + 'static>(name: impl Into<String>, store: S) {
	register_shared_store(name, Arc::new(store));
}

/// Registers an already shared store under `name`.
pub fn register_shared_store(name: impl Into<String>, store: Arc<dyn Store>) {
	STORE_REGISTRY
		.write()
		.insert(name.into(), StoreProvider::Instance(store));
}

/// Registers a store constructor under `name`.
pub fn register_store_factory<F>(name: impl Into<String>, create: F)
where
	F: Fn() -> FactoryResult<Arc<dyn Store>> + Send + Sync + 'static,
{
	STORE_REGISTRY
		.write()
		.insert(name.into(), StoreProvider::Factory(Arc::new(create)));
}

/// Resolves `name` to a store, invoking the constructor if one is
/// registered.
///
/// # Errors
///
/// Returns [`FactoryError::UnknownStore`] when nothing is registered under
/// `name`, or whatever the constructor returns.
pub fn resolve_store(name: &str) -> FactoryResult<Arc<dyn Store>> {
	// Clone out so a constructor can touch the registry without deadlocking
	let provider = STORE_REGISTRY
		.read()
		.get(name)
		.cloned()
		.ok_or_else(|| FactoryError::UnknownStore(name.to_string()))?;
	provider.into_store()
}

/// Checks if a store is registered under `name`.
pub fn has_store(name: &str) -> bool {
	STORE_REGISTRY.read().contains_key(name)
}

/// Removes a registration, returning it.
pub fn unregister_store(name: &str) -> Option<StoreProvider> {
	STORE_REGISTRY.write().remove(name)
}

/// Returns all registered identifiers.
pub fn store_names() -> Vec<String> {
	STORE_REGISTRY.read().keys().cloned().collect()
}
