//! # Middleware Module
//!
//! The pipeline contract shared by every handler an [`App`](crate::app::App)
//! runs: the [`Dispatcher`](crate::dispatcher::Dispatcher), the adapter that
//! runs controllers, and any user middleware.
//!
//! A handler receives the current [`HandlerContext`] by value and answers
//! with a [`Flow`] telling the pipeline what to do next:
//!
//! - [`Flow::Next`] - continue with the next queued handler
//! - [`Flow::InsertNext`] - queue a handler to run immediately, then continue
//! - [`Flow::Done`] - stop and return the response
//!
//! Handlers never touch the pipeline's queue themselves; inserting a handler
//! is an instruction the pipeline applies.
//!
//! ```rust
//! use actionrouter::middleware::{Flow, HandlerContext, Middleware};
//!
//! struct PoweredBy;
//!
//! impl Middleware for PoweredBy {
//!     fn handle(&self, cx: HandlerContext) -> Flow {
//!         let response = cx.response.with_header("x-powered-by", "actionrouter");
//!         Flow::Next(HandlerContext { response, ..cx })
//!     }
//! }
//! ```

mod core;

pub use core::{Flow, HandlerContext, Middleware};
