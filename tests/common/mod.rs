#![allow(dead_code)]

use actionrouter::config::RoutingOptions;
use actionrouter::controller::{ActionContext, Controller};
use actionrouter::http::Response;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Answers `index`, `two` and `three` with statuses 100, 101 and 102.
pub struct IndexController;

impl Controller for IndexController {
    fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response> {
        let status = match action {
            "index" => 100,
            "two" => 101,
            "three" => 102,
            _ => return None,
        };
        Some(cx.response().with_status(status))
    }
}

/// Answers `index`, `five` and `six` with statuses 100, 101 and 102.
pub struct OtherController;

impl Controller for OtherController {
    fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response> {
        let status = match action {
            "index" => 100,
            "five" => 101,
            "six" => 102,
            _ => return None,
        };
        Some(
            cx.response()
                .with_status(status)
                .with_header("x-controller", cx.controller_id().as_str()),
        )
    }
}

/// Static controller tree: `IndexController.rs` and `admin/OtherController.rs`.
pub fn fixture_controllers() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/controllers")
}

pub fn fixture_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app.yaml")
}

/// `adm` → `admin`, loader over the fixture tree.
pub fn loader_options(namespace: &str) -> RoutingOptions {
    let mut options = RoutingOptions {
        name_space: namespace.to_string(),
        modules: BTreeMap::from([("adm".to_string(), "admin".to_string())]),
        ..RoutingOptions::default()
    };
    options.loader.enabled = true;
    options.loader.path = fixture_controllers();
    options
}

pub mod log_capture {
    //! Collects event messages emitted on the current thread.

    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor<'a>(&'a mut Option<String>);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                *self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut message = None;
            event.record(&mut MessageVisitor(&mut message));
            if let Some(message) = message {
                self.0.lock().unwrap().push(message);
            }
        }
    }

    pub struct CapturedLogs {
        messages: Arc<Mutex<Vec<String>>>,
        _guard: tracing::subscriber::DefaultGuard,
    }

    impl CapturedLogs {
        pub fn init() -> Self {
            let capture = Capture::default();
            let messages = Arc::clone(&capture.0);
            let guard = tracing::subscriber::set_default(Registry::default().with(capture));
            Self {
                messages,
                _guard: guard,
            }
        }

        pub fn count(&self, message: &str) -> usize {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.as_str() == message)
                .count()
        }
    }
}
