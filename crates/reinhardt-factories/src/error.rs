//! Error types for the factories module.
//!
//! Configuration errors are fatal to suite startup. Every other variant is
//! raised by a single operation and surfaces to the calling test unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while coordinating factories.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// A `factories` entry did not resolve to an existing location.
	#[error(
		"Factories path '{}' is invalid (resolved to '{}'). Paths should be relative to the project root config",
		path.display(),
		resolved.display()
	)]
	InvalidFactoriesPath {
		/// Path as written in the configuration.
		path: PathBuf,
		/// Path after resolution against the project root.
		resolved: PathBuf,
	},

	/// No dependency module was injected before suite start.
	#[error("Missing dependency: {0}")]
	MissingDependency(String),

	/// `customStore` names a store that is not registered.
	#[error("Unknown custom store: {0}")]
	UnknownStore(String),

	/// A blueprint with the same name is already declared on the engine.
	#[error("Definition already exists: {0}")]
	DefinitionExists(String),

	/// No blueprint is declared under the requested name.
	#[error("Blueprint not found: {0}")]
	BlueprintNotFound(String),

	/// Store rejected a save or delete.
	#[error("Store error: {0}")]
	Store(String),

	/// Error parsing definition or configuration data.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// The coordinator has no active engine yet.
	#[error("Factories are not initialized; run before_suite first")]
	NotInitialized,

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML serialization/deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),
}

impl FactoryError {
	/// Returns true for errors that abort suite initialization.
	pub fn is_config_error(&self) -> bool {
		matches!(
			self,
			Self::InvalidFactoriesPath { .. }
				| Self::MissingDependency(_)
				| Self::UnknownStore(_)
		)
	}
}

/// Result type alias for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;
