//! # Dispatcher Module
//!
//! Resolves the controller a request is routed to and hands it to the
//! pipeline.
//!
//! ## Resolution
//!
//! 1. Read `module` and `controller` from the request attributes, falling
//!    back to `defaultModule` / `defaultController`
//! 2. Both must already be canonical tokens (see
//!    [`canonicalize`](crate::inflector::canonicalize))
//! 3. Inflect the controller token and fill it into `controllerPattern`
//! 4. Prefix the module's fragment (the module must be configured)
//! 5. Prefix `nameSpace`
//! 6. If the id is not eagerly registered and the loader is enabled, open a
//!    loader window for the rest of the resolution
//! 7. The id must resolve to an entry that satisfies the controller capability
//!
//! Every failure is a silent *no route*: the response passes through
//! untouched and nothing is inserted. The reason is only logged at `debug`
//! and returned by [`Dispatcher::resolve`] for callers that want it.
//!
//! ## Pipeline Integration
//!
//! As middleware the dispatcher answers [`Flow::InsertNext`] with the
//! resolved controller, so it runs before anything that was queued after the
//! dispatcher. It never mutates the pipeline itself.
//!
//! [`Flow::InsertNext`]: crate::middleware::Flow::InsertNext

mod core;

pub use core::{DispatchError, Dispatched, Dispatcher, NoRoute, Resolution};
