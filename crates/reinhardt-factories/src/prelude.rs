//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use reinhardt_factories::prelude::*;
//! ```

// Error types
pub use crate::error::{FactoryError, FactoryResult};

// Coordination
pub use crate::config::FactoriesConfig;
pub use crate::coordinator::FactoryCoordinator;
pub use crate::engine::FactoryEngine;
pub use crate::lifecycle::{SuiteHooks, SuiteSettings, TestInfo, TestScope};

// Definitions
pub use crate::definitions::{Blueprint, DefinitionLoader, FakerType, FieldGenerator};
pub use crate::record::Record;

// Persistence
pub use crate::dependency::{OrmDependency, PersistenceCapability};
pub use crate::stores::{
	EntityManager, InMemoryStore, RepositoryStore, Store, register_store, register_store_factory,
};
