//! Log output of the cleanup policy.

mod helpers;

use std::sync::{Arc, Mutex};

use helpers::orm::TestOrm;
use helpers::project::TestProject;
use reinhardt_factories::prelude::*;
use reinhardt_factories::stores::register_store;
use rstest::rstest;
use serde_json::Map;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures log messages to a Vec<String>
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		let mut logs = self.logs.lock().unwrap();
		logs.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

/// Store that accepts saves and refuses every delete.
struct ReadOnlyStore;

impl Store for ReadOnlyStore {
	fn name(&self) -> &str {
		"read-only"
	}

	fn save(&self, record: &mut Record) -> FactoryResult<()> {
		record.pk = Some(serde_json::json!(1));
		Ok(())
	}

	fn delete(&self, record: &Record) -> FactoryResult<()> {
		Err(FactoryError::Store(format!("cannot delete {}", record.model)))
	}
}

fn widget_project() -> TestProject {
	let project = TestProject::new();
	project.write("defs/widgets.json", r#"{"Widget": {"name": "gear"}}"#);
	project
}

fn start(config: FactoriesConfig, orm: Arc<TestOrm>) -> FactoryCoordinator {
	let mut coordinator = FactoryCoordinator::new(config);
	coordinator.inject(orm);
	coordinator.before_suite(SuiteSettings::new()).unwrap();
	coordinator
}

#[rstest]
#[case(Some(false), false, "Cleanup disabled by configuration")]
#[case(None, true, "Cleanup left to the ORM dependency")]
#[case(None, false, "Deleted factory records")]
fn test_after_test_logs_its_decision(
	#[case] cleanup: Option<bool>,
	#[case] dependency_cleanup: bool,
	#[case] expected: &str,
) {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();

	let project = widget_project();
	let mut config = FactoriesConfig::new()
		.with_root(project.root())
		.with_factories("defs");
	config.cleanup = cleanup;
	let mut coordinator = start(config, TestOrm::active_record(dependency_cleanup));
	coordinator.have("Widget", &Map::new()).unwrap();

	// Act
	coordinator.after_test(&TestInfo::new("logged")).unwrap();

	// Assert
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("DEBUG") && log.contains(expected)),
		"Expected '{}' in logs, but got: {:?}",
		expected,
		*captured
	);
}

#[rstest]
fn test_initialize_logs_summary() {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();
	let project = widget_project();

	let _coordinator = start(
		FactoriesConfig::new()
			.with_root(project.root())
			.with_factories("defs"),
		TestOrm::active_record(false),
	);

	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("INFO") && log.contains("Factories initialized")),
		"Expected initialization summary, but got: {:?}",
		*captured
	);
}

#[rstest]
fn test_dropped_scope_logs_cleanup_failure() {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();

	register_store("logging.read_only", ReadOnlyStore);
	let project = widget_project();
	let config = FactoriesConfig::new()
		.with_root(project.root())
		.with_factories("defs")
		.with_custom_store("logging.read_only");
	let mut coordinator = start(config, TestOrm::active_record(false));

	// Act
	{
		let mut scope = coordinator.scope("test_read_only");
		scope.have("Widget", &Map::new()).unwrap();
	}

	// Assert
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("ERROR") && log.contains("After-test hook failed")),
		"Expected cleanup failure log, but got: {:?}",
		*captured
	);
	assert_eq!(coordinator.engine().unwrap().saved_count(), 1);
}
