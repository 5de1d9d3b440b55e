//! # Application Pipeline
//!
//! [`App`] owns an ordered list of [`HandlerDescriptor`]s and runs a request
//! through them. Each run copies the list into its own queue, so handlers
//! inserted during one run (typically the controller a
//! [`Dispatcher`](crate::dispatcher::Dispatcher) resolved) never leak into the
//! next.
//!
//! ```rust
//! use actionrouter::app::App;
//! use actionrouter::config::RoutingOptions;
//! use actionrouter::controller::{ActionContext, Controller};
//! use actionrouter::http::{Request, Response};
//! use actionrouter::registry::ControllerRegistry;
//! use std::sync::Arc;
//!
//! struct IndexController;
//! impl Controller for IndexController {
//!     fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response> {
//!         (action == "index").then(|| cx.response().with_status(200))
//!     }
//! }
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register_controller("IndexController", || IndexController);
//!
//! let mut app = App::new(RoutingOptions::default());
//! app.append_dispatcher(Arc::new(registry));
//!
//! assert_eq!(app.run(Request::default()).status(), 200);
//! ```

mod core;
mod descriptor;

pub use core::{App, MAX_HANDLERS_PER_RUN};
pub use descriptor::HandlerDescriptor;
