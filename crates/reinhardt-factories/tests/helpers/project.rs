//! Temporary project directories holding definition files.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

/// A throwaway project root.
pub struct TestProject {
	dir: TempDir,
}

impl TestProject {
	/// Creates an empty project root.
	pub fn new() -> Self {
		Self {
			dir: TempDir::new().expect("Failed to create project directory"),
		}
	}

	/// Project root path.
	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Writes `content` to `relative`, creating parent directories.
	pub fn write(&self, relative: &str, content: &str) -> &Self {
		let path = self.dir.path().join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).expect("Failed to create definition directory");
		}
		std::fs::write(&path, content).expect("Failed to write definition file");
		self
	}
}

impl Default for TestProject {
	fn default() -> Self {
		Self::new()
	}
}
