//! Hooks the host test runner drives.
//!
//! ## Overview
//!
//! - [`SuiteHooks`]: before-suite / after-test / reconfigure entry points
//! - [`TestScope`]: guard that runs the after-test hook when a test ends,
//!   even if the test panics
//!
//! ## Example
//!
//! ```rust,no_run
//! use reinhardt_factories::prelude::*;
//!
//! fn run(coordinator: &mut FactoryCoordinator) -> FactoryResult<()> {
//!     let mut scope = coordinator.scope("test_widget_is_listed");
//!     scope.have("Widget", &Default::default())?;
//!     // ... exercise the code under test ...
//!     scope.finish()
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};

use crate::config::FactoriesConfig;
use crate::error::FactoryResult;

/// Suite-level settings handed over by the host runner.
///
/// Passed through untouched.
pub type SuiteSettings = Map<String, Value>;

/// Identifies the test a hook runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInfo {
	name: String,
}

impl TestInfo {
	/// Creates test metadata.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}

	/// Test name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Lifecycle entry points called by the host runner.
pub trait SuiteHooks {
	/// Called once before the first test of a suite.
	fn before_suite(&mut self, settings: SuiteSettings) -> FactoryResult<()>;

	/// Called after every test.
	fn after_test(&mut self, test: &TestInfo) -> FactoryResult<()>;

	/// Called when the host swaps configuration mid-run.
	fn reconfigure(&mut self, config: FactoriesConfig, settings: SuiteSettings)
	-> FactoryResult<()>;
}

/// Guard covering a single test.
///
/// Call [`finish`](Self::finish) to run the after-test hook and observe its
/// result. A scope dropped without `finish` (for example while a failed
/// assertion unwinds) still runs the hook and logs any error.
pub struct TestScope<'a, H: SuiteHooks> {
	hooks: &'a mut H,
	test: TestInfo,
	finished: bool,
}

impl<'a, H: SuiteHooks> TestScope<'a, H> {
	/// Opens a scope for `test`.
	pub fn begin(hooks: &'a mut H, test: TestInfo) -> Self {
		Self {
			hooks,
			test,
			finished: false,
		}
	}

	/// The test this scope covers.
	pub fn test(&self) -> &TestInfo {
		&self.test
	}

	/// Runs the after-test hook and returns its result.
	pub fn finish(mut self) -> FactoryResult<()> {
		self.finished = true;
		self.hooks.after_test(&self.test)
	}
}

impl<H: SuiteHooks> Deref for TestScope<'_, H> {
	type Target = H;

	fn deref(&self) -> &H {
		self.hooks
	}
}

impl<H: SuiteHooks> DerefMut for TestScope<'_, H> {
	fn deref_mut(&mut self) -> &mut H {
		self.hooks
	}
}

impl<H: SuiteHooks> Drop for TestScope<'_, H> {
	fn drop(&mut self) {
		if self.finished {
			return;
		}
		if let Err(error) = self.hooks.after_test(&self.test) {
			tracing::error!(test = self.test.name(), %error, "After-test hook failed");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FactoryError;
	use rstest::rstest;

	#[derive(Default)]
	struct RecordingHooks {
		events: Vec<String>,
		fail_after_test: bool,
	}

	impl SuiteHooks for RecordingHooks {
		fn before_suite(&mut self, _settings: SuiteSettings) -> FactoryResult<()> {
			self.events.push("before_suite".to_string());
			Ok(())
		}

		fn after_test(&mut self, test: &TestInfo) -> FactoryResult<()> {
			self.events.push(format!("after_test {}", test.name()));
			if self.fail_after_test {
				return Err(FactoryError::Store("delete failed".to_string()));
			}
			Ok(())
		}

		fn reconfigure(
			&mut self,
			_config: FactoriesConfig,
			_settings: SuiteSettings,
		) -> FactoryResult<()> {
			self.events.push("reconfigure".to_string());
			Ok(())
		}
	}

	#[rstest]
	fn test_finish_runs_hook_once() {
		let mut hooks = RecordingHooks::default();

		let scope = TestScope::begin(&mut hooks, TestInfo::new("test_a"));
		scope.finish().unwrap();

		assert_eq!(hooks.events, vec!["after_test test_a"]);
	}

	#[rstest]
	fn test_finish_returns_hook_error() {
		let mut hooks = RecordingHooks {
			fail_after_test: true,
			..Default::default()
		};

		let result = TestScope::begin(&mut hooks, TestInfo::new("test_b")).finish();

		assert!(matches!(result, Err(FactoryError::Store(_))));
		assert_eq!(hooks.events.len(), 1);
	}

	#[rstest]
	fn test_drop_runs_hook() {
		let mut hooks = RecordingHooks::default();
		{
			let mut scope = TestScope::begin(&mut hooks, TestInfo::new("test_c"));
			scope.before_suite(SuiteSettings::new()).unwrap();
		}

		assert_eq!(hooks.events, vec!["before_suite", "after_test test_c"]);
	}

	#[rstest]
	fn test_drop_runs_hook_while_unwinding() {
		let mut hooks = RecordingHooks::default();

		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let _scope = TestScope::begin(&mut hooks, TestInfo::new("test_d"));
			panic!("assertion failed");
		}));

		assert!(result.is_err());
		assert_eq!(hooks.events, vec!["after_test test_d"]);
	}
}
