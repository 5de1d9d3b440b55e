//! # Registry Module
//!
//! The capability-lookup table controllers are resolved against.
//!
//! Everything routable is registered once at startup under a fully-qualified
//! [`ControllerId`] such as `app::controllers::admin::OtherController`. An
//! entry is a [`ClassEntry`]: a factory for a
//! [`Controller`](crate::controller::Controller), or a factory for a plain
//! [`Middleware`](crate::middleware::Middleware) that happens to live under a controller-like name
//! and must be refused by the dispatcher.
//!
//! Entries come in two kinds:
//!
//! - **eager** entries are always resolvable
//! - **deferred** entries are only resolvable through an open
//!   [`LoaderRegistration`], and only when the [`ControllerLoader`] finds
//!   their source file under its root
//!
//! The registry is immutable once built and is shared behind an `Arc`. A
//! loader window is a guard value scoped to one resolution, so nothing global
//! changes while requests are dispatched.
//!
//! ```rust
//! use actionrouter::controller::{ActionContext, Controller};
//! use actionrouter::http::Response;
//! use actionrouter::registry::ControllerRegistry;
//!
//! struct Home;
//! impl Controller for Home {
//!     fn invoke(&self, _action: &str, cx: &ActionContext<'_>) -> Option<Response> {
//!         Some(cx.response().with_status(200))
//!     }
//! }
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register_controller("app::HomeController", || Home);
//! assert!(registry.is_known("app::HomeController"));
//! ```

mod core;
mod id;
mod loader;

pub use core::{controller_factory, ClassEntry, ControllerFactory, ControllerRegistry, MiddlewareFactory};
pub use id::{ControllerId, SEPARATOR};
pub use loader::{ControllerLoader, LoaderRegistration};
