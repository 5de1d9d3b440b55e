use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::HandlerDescriptor;
use crate::config::RoutingOptions;
use crate::http::{attr, Request, Response};
use crate::inflector::is_canonical;
use crate::middleware::{Flow, HandlerContext, Middleware};
use crate::registry::{ControllerFactory, ControllerId, ControllerLoader, ControllerRegistry};

/// Why a request was not routed. Callers of the pipeline never see this;
/// it exists for logs and for [`Dispatcher::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoRoute {
    /// A routing attribute is not a string or not in canonical form
    MalformedAttribute { name: &'static str },
    /// The module token is not configured under `modules`
    UnknownModule { module: String },
    /// Nothing is registered (or loadable) under the identifier
    UnknownController { id: ControllerId },
    /// The identifier resolves to something that is not a controller
    NotAController { id: ControllerId },
}

impl fmt::Display for NoRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoRoute::MalformedAttribute { name } => {
                write!(f, "attribute '{name}' is not a canonical token")
            }
            NoRoute::UnknownModule { module } => write!(f, "module '{module}' is not configured"),
            NoRoute::UnknownController { id } => write!(f, "no controller registered as '{id}'"),
            NoRoute::NotAController { id } => write!(f, "'{id}' is not a controller"),
        }
    }
}

/// Outcome of resolving a request against the registry.
#[derive(Clone)]
pub enum Resolution {
    Found {
        id: ControllerId,
        factory: ControllerFactory,
    },
    NotFound(NoRoute),
}

impl Resolution {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    /// Resolved id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&ControllerId> {
        match self {
            Resolution::Found { id, .. } => Some(id),
            Resolution::NotFound(_) => None,
        }
    }

    /// The pipeline link for a found controller.
    #[must_use]
    pub fn into_descriptor(self) -> Option<HandlerDescriptor> {
        match self {
            Resolution::Found { id, factory } => Some(HandlerDescriptor::Controller { id, factory }),
            Resolution::NotFound(_) => None,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Found { id, .. } => f.debug_struct("Found").field("id", id).finish_non_exhaustive(),
            Resolution::NotFound(reason) => f.debug_tuple("NotFound").field(reason).finish(),
        }
    }
}

/// Result of a dispatch call.
#[derive(Debug)]
pub struct Dispatched {
    /// The request used for resolution (with any forced attributes applied)
    pub request: Request,
    /// Always the response that was passed in
    pub response: Response,
    /// Controller to run next, `None` when no route was found
    pub next: Option<HandlerDescriptor>,
}

impl Dispatched {
    #[must_use]
    pub fn is_routed(&self) -> bool {
        self.next.is_some()
    }

    /// Pipeline instruction equivalent to this dispatch.
    #[must_use]
    pub fn into_flow(self) -> Flow {
        let cx = HandlerContext::new(self.request, self.response);
        match self.next {
            Some(handler) => Flow::InsertNext(cx, handler),
            None => Flow::Next(cx),
        }
    }
}

/// Dispatch called outside a pipeline without the values it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    MissingContext { missing: &'static str },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::MissingContext { missing } => write!(
                f,
                "failed to dispatch: no {missing} given and the dispatcher is not running inside a pipeline"
            ),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Read a routing attribute, falling back to `default` when absent or null.
fn routing_token<'r>(
    request: &'r Request,
    name: &'static str,
    default: &'r str,
) -> Result<&'r str, NoRoute> {
    let token = match request.attribute(name) {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(NoRoute::MalformedAttribute { name }),
    };

    if is_canonical(token) {
        Ok(token)
    } else {
        Err(NoRoute::MalformedAttribute { name })
    }
}

/// Resolves controllers and inserts them into the pipeline.
#[derive(Debug)]
pub struct Dispatcher {
    options: Arc<RoutingOptions>,
    registry: Arc<ControllerRegistry>,
    loader: ControllerLoader,
}

impl Dispatcher {
    #[must_use]
    pub fn new(options: Arc<RoutingOptions>, registry: Arc<ControllerRegistry>) -> Self {
        let loader = ControllerLoader::from_options(&options);
        Self {
            options,
            registry,
            loader,
        }
    }

    #[must_use]
    pub fn options(&self) -> &RoutingOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn loader(&self) -> &ControllerLoader {
        &self.loader
    }

    /// Identifier the request routes to, without consulting the registry.
    pub fn controller_id(&self, request: &Request) -> Result<ControllerId, NoRoute> {
        let opts = &*self.options;
        let module = routing_token(request, attr::MODULE, &opts.default_module)?;
        let controller = routing_token(request, attr::CONTROLLER, &opts.default_controller)?;

        let mut id = ControllerId::new(&opts.controller_name(controller));

        if !module.is_empty() {
            let fragment = opts
                .module_fragment(module)
                .ok_or_else(|| NoRoute::UnknownModule {
                    module: module.to_string(),
                })?;
            id = ControllerId::join(fragment, id.as_str());
        }

        if let Some(namespace) = opts.namespace() {
            id = ControllerId::join(namespace, id.as_str());
        }

        Ok(id)
    }

    /// Full resolution of `request`, loader window included.
    ///
    /// The loader window (if one was opened) is closed again before this
    /// returns, whatever the outcome.
    #[must_use]
    pub fn resolve(&self, request: &Request) -> Resolution {
        match self.controller_id(request) {
            Ok(id) => self.resolve_id(id),
            Err(reason) => Resolution::NotFound(reason),
        }
    }

    fn resolve_id(&self, id: ControllerId) -> Resolution {
        let registration = (self.options.loader.enabled && !self.registry.is_known(id.as_str()))
            .then(|| self.loader.register(&self.registry));

        let resolution = match self.registry.resolve(id.as_str(), registration.as_ref()) {
            None => Resolution::NotFound(NoRoute::UnknownController { id }),
            Some(entry) => match entry.as_controller() {
                Some(factory) => Resolution::Found {
                    id,
                    factory: Arc::clone(factory),
                },
                None => Resolution::NotFound(NoRoute::NotAController { id }),
            },
        };

        drop(registration);
        resolution
    }

    fn route(&self, request: Request, response: Response) -> Dispatched {
        let resolution = self.resolve(&request);
        match &resolution {
            Resolution::Found { id, .. } => info!(
                request_id = %request.request_id(),
                controller_id = %id,
                "Controller resolved"
            ),
            Resolution::NotFound(reason) => debug!(
                request_id = %request.request_id(),
                reason = %reason,
                "No route - response passes through"
            ),
        }

        Dispatched {
            request,
            response,
            next: resolution.into_descriptor(),
        }
    }

    /// Dispatch with explicit values, falling back to the pipeline context.
    ///
    /// Fails only when neither an explicit value nor `cx` provides the
    /// request or the response. Not finding a route is not an error.
    pub fn dispatch_request(
        &self,
        request: Option<Request>,
        response: Option<Response>,
        cx: Option<&HandlerContext>,
    ) -> Result<Dispatched, DispatchError> {
        let request = request
            .or_else(|| cx.map(|c| c.request.clone()))
            .ok_or(DispatchError::MissingContext { missing: "request" })?;
        let response = response
            .or_else(|| cx.map(|c| c.response.clone()))
            .ok_or(DispatchError::MissingContext { missing: "response" })?;

        Ok(self.route(request, response))
    }

    /// Force a route: apply `attributes` to the request, then dispatch.
    ///
    /// With `preserve == false` the routing attributes (`module`,
    /// `controller`, `action`, `id`, `format`) are reset to null first, so
    /// only what `attributes` sets (plus the configured defaults) counts.
    pub fn dispatch<I, K, V>(
        &self,
        attributes: I,
        preserve: bool,
        request: Option<Request>,
        response: Option<Response>,
        cx: Option<&HandlerContext>,
    ) -> Result<Dispatched, DispatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut request = request
            .or_else(|| cx.map(|c| c.request.clone()))
            .ok_or(DispatchError::MissingContext { missing: "request" })?;

        if !preserve {
            request = request.with_attributes(attr::ROUTING.iter().map(|name| (*name, Value::Null)));
        }
        let request = request.with_attributes(attributes);

        self.dispatch_request(Some(request), response, cx)
    }
}

impl Middleware for Dispatcher {
    fn name(&self) -> &str {
        "dispatcher"
    }

    fn handle(&self, cx: HandlerContext) -> Flow {
        self.route(cx.request, cx.response).into_flow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Noop;

    impl crate::controller::Controller for Noop {
        fn invoke(
            &self,
            _action: &str,
            _cx: &crate::controller::ActionContext<'_>,
        ) -> Option<Response> {
            None
        }
    }

    fn dispatcher(options: RoutingOptions) -> Dispatcher {
        Dispatcher::new(Arc::new(options), Arc::new(ControllerRegistry::new()))
    }

    fn routed_options() -> RoutingOptions {
        RoutingOptions {
            name_space: "app::controllers".into(),
            modules: BTreeMap::from([("adm".to_string(), "admin".to_string())]),
            ..RoutingOptions::default()
        }
    }

    #[test]
    fn default_request_builds_default_controller() {
        let d = dispatcher(RoutingOptions::default());
        assert_eq!(
            d.controller_id(&Request::default()).unwrap().as_str(),
            "IndexController"
        );
    }

    #[test]
    fn namespace_and_module_prefix_the_name() {
        let d = dispatcher(routed_options());
        let req = Request::default()
            .with_attribute(attr::MODULE, "adm")
            .with_attribute(attr::CONTROLLER, "user-profile");
        assert_eq!(
            d.controller_id(&req).unwrap().as_str(),
            "app::controllers::admin::UserProfileController"
        );
    }

    #[test]
    fn null_attributes_fall_back_to_defaults() {
        let d = dispatcher(routed_options());
        let req = Request::default()
            .with_attribute(attr::MODULE, Value::Null)
            .with_attribute(attr::CONTROLLER, Value::Null);
        assert_eq!(
            d.controller_id(&req).unwrap().as_str(),
            "app::controllers::IndexController"
        );
    }

    #[test]
    fn malformed_tokens_are_refused() {
        let d = dispatcher(routed_options());
        for (name, value) in [
            (attr::CONTROLLER, Value::from("Index")),
            (attr::CONTROLLER, Value::from("../index")),
            (attr::CONTROLLER, Value::from(3)),
            (attr::MODULE, Value::from("Adm")),
        ] {
            let req = Request::default().with_attribute(name, value);
            assert_eq!(
                d.controller_id(&req),
                Err(NoRoute::MalformedAttribute { name })
            );
        }
    }

    #[test]
    fn unknown_module_is_refused() {
        let d = dispatcher(routed_options());
        let req = Request::default().with_attribute(attr::MODULE, "blog");
        assert_eq!(
            d.controller_id(&req),
            Err(NoRoute::UnknownModule {
                module: "blog".into()
            })
        );
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let d = dispatcher(RoutingOptions::default());
        let resolution = d.resolve(&Request::default());
        assert!(!resolution.is_found());
        assert!(matches!(
            resolution,
            Resolution::NotFound(NoRoute::UnknownController { .. })
        ));
    }

    #[test]
    fn found_resolution_becomes_controller_descriptor() {
        let mut registry = ControllerRegistry::new();
        registry.register_controller("IndexController", || Noop);
        let d = Dispatcher::new(Arc::new(RoutingOptions::default()), Arc::new(registry));

        let descriptor = d.resolve(&Request::default()).into_descriptor();
        assert_eq!(
            descriptor.as_ref().and_then(HandlerDescriptor::controller_id).map(ControllerId::as_str),
            Some("IndexController")
        );

        let missing = Request::default().with_attribute(attr::CONTROLLER, "other");
        assert!(d.resolve(&missing).into_descriptor().is_none());
    }

    #[test]
    fn missing_context_is_an_error() {
        let d = dispatcher(RoutingOptions::default());
        let err = d.dispatch_request(None, Some(Response::default()), None).unwrap_err();
        assert_eq!(err, DispatchError::MissingContext { missing: "request" });

        let err = d.dispatch_request(Some(Request::default()), None, None).unwrap_err();
        assert_eq!(err, DispatchError::MissingContext { missing: "response" });
        assert!(err.to_string().contains("not running inside a pipeline"));

        let cx = HandlerContext::new(Request::default(), Response::default());
        assert!(d.dispatch_request(None, None, Some(&cx)).is_ok());
    }
}
