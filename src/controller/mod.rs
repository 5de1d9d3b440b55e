//! # Controller Module
//!
//! The capability every routable controller implements, and the adapter that
//! runs a controller as a pipeline link.
//!
//! A controller exposes named actions through a single entry point,
//! [`Controller::invoke`]. The action name it receives is the canonical
//! token from the request's `action` attribute (`"index"`, `"two"`,
//! `"list-all"`). Returning `None` means "no such action" and lets the
//! pipeline continue with the response untouched.
//!
//! ```rust
//! use actionrouter::controller::{ActionContext, Controller};
//! use actionrouter::http::Response;
//!
//! struct IndexController;
//!
//! impl Controller for IndexController {
//!     fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response> {
//!         match action {
//!             "index" => Some(cx.response().with_status(200)),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

mod handler;

pub use handler::ControllerHandler;

use serde_json::Value;

use crate::http::{attr, Request, Response};
use crate::registry::ControllerId;

/// Capability contract for routable controllers.
pub trait Controller: Send + Sync {
    /// Run `action`, or return `None` if this controller has no such action.
    fn invoke(&self, action: &str, cx: &ActionContext<'_>) -> Option<Response>;
}

/// What an action can see while it runs.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    controller_id: &'a ControllerId,
    action: &'a str,
    request: &'a Request,
    response: &'a Response,
}

impl<'a> ActionContext<'a> {
    #[must_use]
    pub fn new(
        controller_id: &'a ControllerId,
        action: &'a str,
        request: &'a Request,
        response: &'a Response,
    ) -> Self {
        Self {
            controller_id,
            action,
            request,
            response,
        }
    }

    #[must_use]
    pub fn controller_id(&self) -> &'a ControllerId {
        self.controller_id
    }

    #[must_use]
    pub fn action(&self) -> &'a str {
        self.action
    }

    #[must_use]
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// The response produced so far; actions usually derive theirs from it.
    #[must_use]
    pub fn response(&self) -> &'a Response {
        self.response
    }

    /// The `id` attribute, if set and not null.
    #[must_use]
    pub fn id(&self) -> Option<&'a Value> {
        self.request.attribute(attr::ID).filter(|v| !v.is_null())
    }

    /// The `format` attribute as a string, e.g. `"json"`.
    #[must_use]
    pub fn format(&self) -> Option<&'a str> {
        self.request.attribute_str(attr::FORMAT)
    }
}
