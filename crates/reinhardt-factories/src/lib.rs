//! Test-suite factory coordination for the Reinhardt framework.
//!
//! This crate wires a record factory into a test run:
//!
//! - **Definitions**: blueprints loaded from JSON/YAML files or declared in code
//! - **Stores**: pluggable persistence, chosen once per suite
//! - **Cleanup**: records created during a test are deleted afterwards,
//!   unless the configuration or the ORM dependency says otherwise
//!
//! # Features
//!
//! - `json` - JSON definition and config files (enabled by default)
//! - `yaml` - YAML definition and config files (enabled by default)
//!
//! # Quick Start
//!
//! Write a definition file (`tests/factories/widgets.yaml`):
//!
//! ```yaml
//! Widget:
//!   name: gear
//!   serial: { sequence: "SN-{n}" }
//!   owner: { faker: safe_email }
//! ```
//!
//! Point the configuration at it and drive the coordinator from the test
//! runner:
//!
//! ```ignore
//! use reinhardt_factories::prelude::*;
//!
//! let config = FactoriesConfig::new()
//!     .with_root(env!("CARGO_MANIFEST_DIR"))
//!     .with_factories("tests/factories");
//! let mut coordinator = FactoryCoordinator::new(config);
//! coordinator.inject(orm.clone());
//! coordinator.before_suite(SuiteSettings::new())?;
//!
//! let mut scope = coordinator.scope("test_widget_listing");
//! let widget = scope.have("Widget", &Map::new())?;
//! let drafts = scope.have_multiple("Widget", 3, &overrides)?;
//! scope.finish()?; // deletes the four widgets
//! ```
//!
//! # Architecture
//!
//! - [`FactoryCoordinator`] - suite lifecycle and cleanup policy
//! - [`FactoryEngine`] - blueprints, generation, created-record registry
//! - [`Store`](stores::Store) - persistence strategy
//! - [`OrmDependency`](dependency::OrmDependency) - the injected ORM integration
//! - [`SuiteHooks`](lifecycle::SuiteHooks) - entry points for the host runner

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod coordinator;
pub mod definitions;
pub mod dependency;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod prelude;
pub mod record;
pub mod stores;

// Re-export commonly used types at crate root
pub use config::FactoriesConfig;
pub use coordinator::FactoryCoordinator;
pub use engine::FactoryEngine;
pub use error::{FactoryError, FactoryResult};
pub use record::Record;
