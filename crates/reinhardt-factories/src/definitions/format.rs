//! Source file formats for definitions and configuration.

use std::path::Path;

/// Supported source file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SourceFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires `yaml` feature).
	Yaml,
}

impl SourceFormat {
	/// Determines the format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_factories::definitions::SourceFormat;
	/// assert_eq!(SourceFormat::from_extension("json"), Some(SourceFormat::Json));
	/// assert_eq!(SourceFormat::from_extension("yml"), Some(SourceFormat::Yaml));
	/// assert_eq!(SourceFormat::from_extension("php"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}
}

impl std::fmt::Display for SourceFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::path::PathBuf;

	#[rstest]
	#[case("json", Some(SourceFormat::Json))]
	#[case("JSON", Some(SourceFormat::Json))]
	#[case("yaml", Some(SourceFormat::Yaml))]
	#[case("yml", Some(SourceFormat::Yaml))]
	#[case("xml", None)]
	fn test_from_extension(#[case] ext: &str, #[case] expected: Option<SourceFormat>) {
		assert_eq!(SourceFormat::from_extension(ext), expected);
	}

	#[rstest]
	fn test_from_path() {
		assert_eq!(
			SourceFormat::from_path(&PathBuf::from("defs/widgets.yaml")),
			Some(SourceFormat::Yaml)
		);
		assert_eq!(SourceFormat::from_path(&PathBuf::from("README")), None);
	}
}
