use crate::app::HandlerDescriptor;
use crate::http::{Request, Response};

/// Request/response pair a handler works on.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerContext {
    pub request: Request,
    pub response: Response,
}

impl HandlerContext {
    #[must_use]
    pub fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }
}

/// What the pipeline should do after a handler returns.
#[derive(Debug)]
pub enum Flow {
    /// Continue with the next queued handler.
    Next(HandlerContext),
    /// Run the given handler before anything already queued, then continue.
    InsertNext(HandlerContext, HandlerDescriptor),
    /// Stop the run and return this response.
    Done(Response),
}

impl Flow {
    /// The response this flow carries forward.
    #[must_use]
    pub fn response(&self) -> &Response {
        match self {
            Flow::Next(cx) | Flow::InsertNext(cx, _) => &cx.response,
            Flow::Done(response) => response,
        }
    }
}

/// A link in the application pipeline.
pub trait Middleware: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn handle(&self, cx: HandlerContext) -> Flow;
}

impl<F> Middleware for F
where
    F: Fn(HandlerContext) -> Flow + Send + Sync,
{
    fn handle(&self, cx: HandlerContext) -> Flow {
        self(cx)
    }
}
