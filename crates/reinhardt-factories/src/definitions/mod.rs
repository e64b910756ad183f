//! Blueprint definitions.
//!
//! - [`Blueprint`] - named template of field generators
//! - [`FieldGenerator`] - literal, fake, or sequence value for one field
//! - [`FakerType`] - fake data catalogue
//! - [`DefinitionLoader`] - reads blueprints from JSON/YAML files

mod blueprint;
mod faker;
mod format;
mod loader;

pub use blueprint::{Blueprint, FieldGenerator, Sequences};
pub use faker::FakerType;
pub use format::SourceFormat;
pub use loader::DefinitionLoader;
