//! Definition file loading.
//!
//! A definition file maps blueprint names to field mappings:
//!
//! ```yaml
//! Widget:
//!   name: gear
//!   code: { sequence: "W-{n}" }
//!   owner: { faker: email }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use walkdir::WalkDir;

use super::{Blueprint, SourceFormat};
use crate::error::{FactoryError, FactoryResult};

/// Reads blueprints from definition files.
#[derive(Debug, Default)]
pub struct DefinitionLoader;

impl DefinitionLoader {
	/// Creates a new loader.
	pub fn new() -> Self {
		Self
	}

	/// Loads a single file or every definition file below a directory.
	///
	/// Directory entries are visited in file-name order. Files whose
	/// extension is not a known format are skipped.
	pub fn load_path(&self, path: &Path) -> FactoryResult<Vec<Blueprint>> {
		if path.is_file() {
			return self.parse_file(path);
		}

		let mut blueprints = Vec::new();
		for entry in WalkDir::new(path)
			.follow_links(true)
			.sort_by_file_name()
			.into_iter()
		{
			let entry = entry.map_err(|e| FactoryError::IoError(e.into()))?;
			let file = entry.path();
			if !entry.file_type().is_file() {
				continue;
			}
			if SourceFormat::from_path(file).is_none() {
				tracing::debug!(path = %file.display(), "Skipping non-definition file");
				continue;
			}
			blueprints.extend(self.parse_file(file)?);
		}
		Ok(blueprints)
	}

	/// Parses one definition file. The format comes from its extension.
	pub fn parse_file(&self, path: &Path) -> FactoryResult<Vec<Blueprint>> {
		let format = SourceFormat::from_path(path).ok_or_else(|| {
			FactoryError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path)?;
		self.parse_string(&content, format).map_err(|e| match e {
			FactoryError::ParseError(message) => {
				FactoryError::ParseError(format!("{}: {}", path.display(), message))
			}
			other => other,
		})
	}

	/// Parses definition content in the given format.
	pub fn parse_string(&self, content: &str, format: SourceFormat) -> FactoryResult<Vec<Blueprint>> {
		let definitions: IndexMap<String, Value> = match format {
			SourceFormat::Json => serde_json::from_str(content)?,
			SourceFormat::Yaml => self.parse_yaml(content)?,
		};

		definitions
			.into_iter()
			.map(|(name, fields)| Blueprint::from_value(name, fields))
			.collect()
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> FactoryResult<IndexMap<String, Value>> {
		// An empty YAML document parses as null
		let definitions: Option<IndexMap<String, Value>> = serde_yaml::from_str(content)?;
		Ok(definitions.unwrap_or_default())
	}

	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> FactoryResult<IndexMap<String, Value>> {
		Err(FactoryError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}
