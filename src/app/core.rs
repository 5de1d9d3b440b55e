use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

use super::descriptor::HandlerDescriptor;
use crate::config::{AppConfig, RoutingOptions};
use crate::controller::{Controller, ControllerHandler};
use crate::dispatcher::Dispatcher;
use crate::http::{Request, Response};
use crate::middleware::{Flow, HandlerContext, Middleware};
use crate::registry::{ControllerId, ControllerRegistry};

/// Upper bound on handlers executed in one run; stops middleware that keeps
/// inserting handlers from spinning forever.
pub const MAX_HANDLERS_PER_RUN: usize = 1024;

/// Ordered middleware pipeline.
pub struct App {
    options: Arc<RoutingOptions>,
    handlers: Vec<HandlerDescriptor>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(RoutingOptions::default())
    }
}

impl App {
    #[must_use]
    pub fn new(options: RoutingOptions) -> Self {
        Self {
            options: Arc::new(options),
            handlers: Vec::new(),
        }
    }

    /// Pipeline configured from the `controller` section, with a dispatcher
    /// over `registry` as its first link.
    #[must_use]
    pub fn from_config(config: &AppConfig, registry: Arc<ControllerRegistry>) -> Self {
        let mut app = Self::new(config.controller.clone());
        app.append_dispatcher(registry);
        app
    }

    #[must_use]
    pub fn options(&self) -> &Arc<RoutingOptions> {
        &self.options
    }

    #[must_use]
    pub fn handlers(&self) -> &[HandlerDescriptor] {
        &self.handlers
    }

    pub fn append(&mut self, handler: HandlerDescriptor) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    pub fn prepend(&mut self, handler: HandlerDescriptor) -> &mut Self {
        self.handlers.insert(0, handler);
        self
    }

    pub fn append_middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.append(HandlerDescriptor::middleware(middleware))
    }

    pub fn append_controller<C, F>(&mut self, id: impl Into<ControllerId>, factory: F) -> &mut Self
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.append(HandlerDescriptor::controller(id, factory))
    }

    /// Append a [`Dispatcher`] sharing this app's routing options.
    pub fn append_dispatcher(&mut self, registry: Arc<ControllerRegistry>) -> &mut Self {
        let dispatcher = Dispatcher::new(Arc::clone(&self.options), registry);
        self.append(HandlerDescriptor::middleware(dispatcher))
    }

    /// Run `request` through the pipeline, starting from [`Response::default`].
    #[must_use]
    pub fn run(&self, request: Request) -> Response {
        self.run_with(request, Response::default())
    }

    /// Run `request` through the pipeline, starting from `response`.
    #[must_use]
    pub fn run_with(&self, request: Request, response: Response) -> Response {
        let span = info_span!(
            "app_run",
            request_id = %request.request_id(),
            method = %request.method(),
            path = %request.path()
        );
        let _entered = span.enter();

        let start = Instant::now();
        let mut queue: VecDeque<HandlerDescriptor> = self.handlers.iter().cloned().collect();
        let mut cx = HandlerContext::new(request, response);
        let mut executed = 0usize;

        while let Some(handler) = queue.pop_front() {
            if executed == MAX_HANDLERS_PER_RUN {
                warn!(
                    limit = MAX_HANDLERS_PER_RUN,
                    pending = queue.len() + 1,
                    "Handler limit reached - aborting run"
                );
                break;
            }
            executed += 1;

            debug!(handler = %handler.name(), remaining = queue.len(), "Running handler");
            match self.invoke(&handler, cx) {
                Flow::Next(next) => cx = next,
                Flow::InsertNext(next, inserted) => {
                    debug!(
                        handler = %handler.name(),
                        inserted = %inserted.name(),
                        "Handler inserted ahead of queue"
                    );
                    queue.push_front(inserted);
                    cx = next;
                }
                Flow::Done(response) => {
                    info!(
                        status = response.status(),
                        handlers = executed,
                        elapsed_us = start.elapsed().as_micros() as u64,
                        stopped_by = %handler.name(),
                        "Pipeline complete"
                    );
                    return response;
                }
            }
        }

        info!(
            status = cx.response.status(),
            handlers = executed,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Pipeline complete"
        );
        cx.response
    }

    fn invoke(&self, handler: &HandlerDescriptor, cx: HandlerContext) -> Flow {
        match handler {
            HandlerDescriptor::Middleware(middleware) => middleware.handle(cx),
            HandlerDescriptor::Controller { id, factory } => {
                ControllerHandler::new(id.clone(), factory(), &self.options.default_action)
                    .handle(cx)
            }
        }
    }
}
