//! Module configuration.
//!
//! The configuration mirrors the keys a project puts in its suite config:
//!
//! ```yaml
//! factories:
//!   - tests/factories
//!   - tests/extra/widgets.yaml
//! customStore: app.AuditedStore
//! cleanup: true
//! ```
//!
//! `factories` accepts either a single path or a list. Paths are resolved
//! against the project root, which the host supplies with
//! [`FactoriesConfig::with_root`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::definitions::SourceFormat;
use crate::error::{FactoryError, FactoryResult};

/// Configuration for a [`FactoryCoordinator`](crate::FactoryCoordinator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FactoriesConfig {
	/// Definition sources, in load order.
	#[serde(
		default,
		deserialize_with = "one_or_many",
		skip_serializing_if = "Vec::is_empty"
	)]
	pub factories: Vec<PathBuf>,

	/// Identifier of a store registered with
	/// [`register_store`](crate::stores::register_store) or
	/// [`register_store_factory`](crate::stores::register_store_factory).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_store: Option<String>,

	/// `Some(false)` disables cleanup. `None` and `Some(true)` defer to the
	/// dependency's own setting.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cleanup: Option<bool>,

	/// Project root that `factories` entries are relative to.
	#[serde(skip)]
	pub root: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
	One(PathBuf),
	Many(Vec<PathBuf>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
		None => Vec::new(),
		Some(OneOrMany::One(path)) => vec![path],
		Some(OneOrMany::Many(paths)) => paths,
	})
}

impl FactoriesConfig {
	/// Creates an empty configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a definition source.
	pub fn with_factories(mut self, path: impl Into<PathBuf>) -> Self {
		self.factories.push(path.into());
		self
	}

	/// Sets the custom store identifier.
	pub fn with_custom_store(mut self, name: impl Into<String>) -> Self {
		self.custom_store = Some(name.into());
		self
	}

	/// Sets the cleanup flag explicitly.
	pub fn with_cleanup(mut self, cleanup: bool) -> Self {
		self.cleanup = Some(cleanup);
		self
	}

	/// Sets the project root.
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = Some(root.into());
		self
	}

	/// Returns true when the configuration explicitly disables cleanup.
	pub fn cleanup_disabled(&self) -> bool {
		self.cleanup == Some(false)
	}

	/// Returns the project root, falling back to the working directory.
	pub fn root_dir(&self) -> FactoryResult<PathBuf> {
		match &self.root {
			Some(root) => Ok(root.clone()),
			None => Ok(std::env::current_dir()?),
		}
	}

	/// Resolves a `factories` entry to an existing, canonical location.
	///
	/// # Errors
	///
	/// Returns [`FactoryError::InvalidFactoriesPath`] when the location does
	/// not exist.
	pub fn resolve_factory_path(&self, path: &Path) -> FactoryResult<PathBuf> {
		let joined = if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.root_dir()?.join(path)
		};

		std::fs::canonicalize(&joined).map_err(|_| FactoryError::InvalidFactoriesPath {
			path: path.to_path_buf(),
			resolved: joined,
		})
	}

	/// Parses a configuration from YAML.
	#[cfg(feature = "yaml")]
	pub fn from_yaml_str(content: &str) -> FactoryResult<Self> {
		Ok(serde_yaml::from_str(content)?)
	}

	/// Parses a configuration from JSON.
	pub fn from_json_str(content: &str) -> FactoryResult<Self> {
		Ok(serde_json::from_str(content)?)
	}

	/// Reads a configuration file. The format is chosen by extension and the
	/// root defaults to the file's parent directory.
	pub fn from_path(path: &Path) -> FactoryResult<Self> {
		let format = SourceFormat::from_path(path)
			.ok_or_else(|| FactoryError::UnsupportedExtension(path.display().to_string()))?;
		let content = std::fs::read_to_string(path)?;

		let mut config = match format {
			SourceFormat::Json => Self::from_json_str(&content)?,
			#[cfg(feature = "yaml")]
			SourceFormat::Yaml => Self::from_yaml_str(&content)?,
			#[cfg(not(feature = "yaml"))]
			SourceFormat::Yaml => {
				return Err(FactoryError::UnsupportedExtension(
					"YAML support requires the 'yaml' feature".to_string(),
				));
			}
		};
		if let Some(parent) = path.parent() {
			config.root = Some(parent.to_path_buf());
		}
		Ok(config)
	}
}
