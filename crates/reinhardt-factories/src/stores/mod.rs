//! Persistence stores.
//!
//! A [`Store`] saves and deletes records on behalf of the
//! [`FactoryEngine`](crate::FactoryEngine). The coordinator picks one per
//! suite:
//!
//! 1. a store registered under the configured `customStore` identifier,
//! 2. a [`RepositoryStore`] when the dependency is data-mapper capable,
//! 3. otherwise none, and the engine falls back to [`InMemoryStore`].

mod memory;
mod registry;
mod repository;

pub use memory::InMemoryStore;
pub use registry::{
	StoreFactoryFn, StoreProvider, has_store, register_shared_store, register_store,
	register_store_factory, resolve_store, store_names, unregister_store,
};
pub use repository::{EntityManager, RepositoryStore};

use crate::error::FactoryResult;
use crate::record::Record;

/// Persistence strategy used by the factory engine.
pub trait Store: Send + Sync {
	/// Short name used in logs.
	fn name(&self) -> &str;

	/// Persists a record and assigns its primary key.
	fn save(&self, record: &mut Record) -> FactoryResult<()>;

	/// Deletes a previously saved record.
	fn delete(&self, record: &Record) -> FactoryResult<()>;
}
