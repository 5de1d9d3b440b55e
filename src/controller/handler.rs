use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{ActionContext, Controller};
use crate::http::attr;
use crate::inflector::is_canonical;
use crate::middleware::{Flow, HandlerContext, Middleware};
use crate::registry::ControllerId;

/// Runs one controller instance as a pipeline link.
///
/// Reads the `action` attribute (falling back to the configured default),
/// refuses tokens that are not canonical, and continues the pipeline with
/// whatever response the action produced. An unknown or malformed action
/// passes the context through unchanged.
pub struct ControllerHandler {
    id: ControllerId,
    controller: Box<dyn Controller>,
    default_action: Arc<str>,
}

impl ControllerHandler {
    #[must_use]
    pub fn new(id: ControllerId, controller: Box<dyn Controller>, default_action: &str) -> Self {
        Self {
            id,
            controller,
            default_action: Arc::from(default_action),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ControllerId {
        &self.id
    }
}

impl Middleware for ControllerHandler {
    fn name(&self) -> &str {
        self.id.as_str()
    }

    fn handle(&self, cx: HandlerContext) -> Flow {
        let action = match cx.request.attribute(attr::ACTION) {
            None | Some(Value::Null) => &*self.default_action,
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                debug!(
                    request_id = %cx.request.request_id(),
                    controller_id = %self.id,
                    action = %other,
                    "Action attribute is not a string - passing through"
                );
                return Flow::Next(cx);
            }
        };

        if !is_canonical(action) {
            debug!(
                request_id = %cx.request.request_id(),
                controller_id = %self.id,
                action = %action,
                "Action is not canonical - passing through"
            );
            return Flow::Next(cx);
        }

        let start = Instant::now();
        let action_cx = ActionContext::new(&self.id, action, &cx.request, &cx.response);
        match self.controller.invoke(action, &action_cx) {
            Some(response) => {
                info!(
                    request_id = %cx.request.request_id(),
                    controller_id = %self.id,
                    action = %action,
                    status = response.status(),
                    execution_time_us = start.elapsed().as_micros() as u64,
                    "Action executed"
                );
                Flow::Next(HandlerContext {
                    request: cx.request,
                    response,
                })
            }
            None => {
                debug!(
                    request_id = %cx.request.request_id(),
                    controller_id = %self.id,
                    action = %action,
                    "Controller has no such action - passing through"
                );
                Flow::Next(cx)
            }
        }
    }
}
