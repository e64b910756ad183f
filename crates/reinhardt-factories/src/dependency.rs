//! The ORM integration the coordinator depends on.
//!
//! The dependency decides two things: whether a repository-backed store can
//! be built (it exposes an [`EntityManager`]) and whether it already cleans
//! up after each test itself, for example by rolling back a transaction.

use std::sync::Arc;

use crate::stores::EntityManager;

/// Persistence style of the injected ORM.
#[derive(Clone)]
pub enum PersistenceCapability {
	/// Repository-style ORM; records go through the entity manager.
	DataMapper(Arc<dyn EntityManager>),
	/// Records persist themselves; no repository store is built.
	ActiveRecord,
}

impl PersistenceCapability {
	/// Returns true for [`PersistenceCapability::DataMapper`].
	pub fn is_data_mapper(&self) -> bool {
		matches!(self, Self::DataMapper(_))
	}

	/// Returns the entity manager of a data-mapper ORM.
	pub fn entity_manager(&self) -> Option<&Arc<dyn EntityManager>> {
		match self {
			Self::DataMapper(manager) => Some(manager),
			Self::ActiveRecord => None,
		}
	}
}

impl std::fmt::Debug for PersistenceCapability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::DataMapper(_) => f.write_str("DataMapper"),
			Self::ActiveRecord => f.write_str("ActiveRecord"),
		}
	}
}

/// Contract the injected ORM integration must satisfy.
#[cfg_attr(test, mockall::automock)]
pub trait OrmDependency: Send + Sync {
	/// Persistence style. Read once, when the dependency is injected.
	fn capability(&self) -> PersistenceCapability;

	/// The dependency's own cleanup setting. Read on every cleanup decision.
	fn cleanup(&self) -> bool;
}
