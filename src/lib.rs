//! # actionrouter
//!
//! **actionrouter** is the dispatch layer of a middleware-pipeline web
//! application: given a request that an upstream router has annotated with
//! `module`, `controller` and `action` attributes, it works out which
//! controller to run, inserts it into the pipeline and lets the controller
//! execute the requested action.
//!
//! ## Overview
//!
//! Controller identifiers are built from configuration alone:
//!
//! ```text
//! nameSpace :: modules[module] :: controllerPattern(inflect(controller))
//! app       :: admin           :: OtherController
//! ```
//!
//! and resolved against a [`ControllerRegistry`] of factories registered at
//! startup. Identifiers that are not registered eagerly can be found through
//! a scoped [`ControllerLoader`](registry::ControllerLoader) window, which is
//! opened for one resolution and closed again before it returns.
//!
//! A request that cannot be routed is never an error: the response passes
//! through untouched for a later handler (typically a 404 responder).
//!
//! ## Architecture
//!
//! - **[`inflector`]** - Canonical token form and name inflections
//! - **[`config`]** - Routing options and config file loading
//! - **[`registry`]** - Controller identifiers, the capability table and the loader
//! - **[`dispatcher`]** - Controller resolution and pipeline insertion
//! - **[`controller`]** - The controller trait and its pipeline adapter
//! - **[`app`]** - The middleware pipeline
//! - **[`middleware`]** - Pipeline contract (`Flow`, `HandlerContext`)
//! - **[`http`]** - Request and response values
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `actionrouter` command-line tool
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as App pipeline
//!     participant Disp as Dispatcher
//!     participant Reg as ControllerRegistry
//!     participant Loader as LoaderRegistration
//!     participant Ctrl as ControllerHandler
//!
//!     App->>Disp: handle(HandlerContext)
//!     Disp->>Disp: controller_id(request)
//!     alt Malformed token / unknown module
//!         Disp-->>App: Flow::Next (unchanged)
//!     end
//!     opt Not eagerly registered and loader enabled
//!         Disp->>Loader: register()
//!     end
//!     Disp->>Reg: resolve(id, loader)
//!     Reg-->>Disp: ClassEntry
//!     Disp->>Loader: unregister (drop)
//!     alt Controller entry
//!         Disp-->>App: Flow::InsertNext(controller)
//!         App->>Ctrl: handle(HandlerContext)
//!         Ctrl->>Ctrl: invoke(action)
//!         Ctrl-->>App: Flow::Next(new response)
//!     else Missing / not a controller
//!         Disp-->>App: Flow::Next (unchanged)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use actionrouter::{App, AppConfig, ControllerRegistry};
//! use actionrouter::controller::{ActionContext, Controller};
//! use actionrouter::http::{attr, Request, Response};
//! use std::sync::Arc;
//!
//! struct UserController;
//!
//! impl Controller for UserController {
//!     fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response> {
//!         match action {
//!             "index" => Some(cx.response().with_status(200)),
//!             "show" => Some(cx.response().with_status(200).with_body(
//!                 serde_json::json!({ "id": cx.id() }),
//!             )),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register_controller("UserController", || UserController);
//!
//! let app = App::from_config(&AppConfig::default(), Arc::new(registry));
//!
//! let request = Request::default()
//!     .with_attribute(attr::CONTROLLER, "user")
//!     .with_attribute(attr::ACTION, "show")
//!     .with_attribute(attr::ID, 7);
//! let response = app.run(request);
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body()["id"], 7);
//!
//! // Unroutable requests fall through with the default 404.
//! let response = app.run(Request::default().with_attribute(attr::CONTROLLER, "nope"));
//! assert_eq!(response.status(), 404);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod http;
pub mod inflector;
pub mod logging;
pub mod middleware;
pub mod registry;

pub use app::App;
pub use config::{load_config, AppConfig, RoutingOptions};
pub use dispatcher::Dispatcher;
pub use registry::ControllerRegistry;
