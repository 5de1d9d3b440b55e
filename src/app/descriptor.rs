use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;
use crate::middleware::Middleware;
use crate::registry::{controller_factory, ControllerFactory, ControllerId};

/// A queued pipeline link.
///
/// Descriptors are plain values: a shared middleware, or a controller id
/// plus the factory that builds it when its turn comes.
#[derive(Clone)]
pub enum HandlerDescriptor {
    Middleware(Arc<dyn Middleware>),
    Controller {
        id: ControllerId,
        factory: ControllerFactory,
    },
}

impl HandlerDescriptor {
    pub fn middleware<M: Middleware + 'static>(middleware: M) -> Self {
        HandlerDescriptor::Middleware(Arc::new(middleware))
    }

    pub fn controller<C, F>(id: impl Into<ControllerId>, factory: F) -> Self
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        HandlerDescriptor::Controller {
            id: id.into(),
            factory: controller_factory(factory),
        }
    }

    /// Name used in log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            HandlerDescriptor::Middleware(m) => m.name(),
            HandlerDescriptor::Controller { id, .. } => id.as_str(),
        }
    }

    /// Controller id, for controller descriptors.
    #[must_use]
    pub fn controller_id(&self) -> Option<&ControllerId> {
        match self {
            HandlerDescriptor::Controller { id, .. } => Some(id),
            HandlerDescriptor::Middleware(_) => None,
        }
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDescriptor::Middleware(m) => f.debug_tuple("Middleware").field(&m.name()).finish(),
            HandlerDescriptor::Controller { id, .. } => {
                f.debug_struct("Controller").field("id", id).finish_non_exhaustive()
            }
        }
    }
}
