use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::id::ControllerId;
use super::loader::LoaderRegistration;
use crate::controller::Controller;
use crate::middleware::Middleware;

/// Builds a fresh controller instance for one pipeline run.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Builds a plain middleware; registered under an id it can be found but
/// never dispatched to.
pub type MiddlewareFactory = Arc<dyn Fn() -> Arc<dyn Middleware> + Send + Sync>;

/// Wrap a closure returning a concrete controller into a [`ControllerFactory`].
pub fn controller_factory<C, F>(factory: F) -> ControllerFactory
where
    C: Controller + 'static,
    F: Fn() -> C + Send + Sync + 'static,
{
    Arc::new(move || Box::new(factory()) as Box<dyn Controller>)
}

/// What a registered name resolves to.
#[derive(Clone)]
pub enum ClassEntry {
    /// Satisfies the controller capability and can be dispatched to
    Controller(ControllerFactory),
    /// Known, but not a controller
    Middleware(MiddlewareFactory),
}

impl ClassEntry {
    /// The controller factory, or `None` for entries that are not controllers.
    #[must_use]
    pub fn as_controller(&self) -> Option<&ControllerFactory> {
        match self {
            ClassEntry::Controller(factory) => Some(factory),
            ClassEntry::Middleware(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ClassEntry::Controller(_) => "controller",
            ClassEntry::Middleware(_) => "middleware",
        }
    }
}

impl fmt::Debug for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassEntry").field(&self.kind()).finish()
    }
}

/// Name → factory table built at startup.
#[derive(Default, Clone)]
pub struct ControllerRegistry {
    eager: HashMap<ControllerId, ClassEntry>,
    deferred: HashMap<ControllerId, ClassEntry>,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut eager: Vec<&ControllerId> = self.eager.keys().collect();
        let mut deferred: Vec<&ControllerId> = self.deferred.keys().collect();
        eager.sort();
        deferred.sort();
        f.debug_struct("ControllerRegistry")
            .field("eager", &eager)
            .field("deferred", &deferred)
            .finish()
    }
}

fn insert(
    table: &mut HashMap<ControllerId, ClassEntry>,
    table_name: &'static str,
    id: ControllerId,
    entry: ClassEntry,
) {
    let kind = entry.kind();
    if table.insert(id.clone(), entry).is_some() {
        warn!(
            controller_id = %id,
            table = table_name,
            kind,
            "Replaced existing registry entry"
        );
    } else {
        info!(
            controller_id = %id,
            table = table_name,
            kind,
            total = table.len(),
            "Registry entry added"
        );
    }
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an always-resolvable entry. A second registration under the same
    /// id replaces the first.
    pub fn register(&mut self, id: impl Into<ControllerId>, entry: ClassEntry) -> &mut Self {
        insert(&mut self.eager, "eager", id.into(), entry);
        self
    }

    /// Add an entry that only resolves through an open loader window.
    pub fn defer(&mut self, id: impl Into<ControllerId>, entry: ClassEntry) -> &mut Self {
        insert(&mut self.deferred, "deferred", id.into(), entry);
        self
    }

    pub fn register_controller<C, F>(&mut self, id: impl Into<ControllerId>, factory: F) -> &mut Self
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.register(id, ClassEntry::Controller(controller_factory(factory)))
    }

    pub fn defer_controller<C, F>(&mut self, id: impl Into<ControllerId>, factory: F) -> &mut Self
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.defer(id, ClassEntry::Controller(controller_factory(factory)))
    }

    pub fn register_middleware<M, F>(&mut self, id: impl Into<ControllerId>, factory: F) -> &mut Self
    where
        M: Middleware + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        let factory: MiddlewareFactory = Arc::new(move || Arc::new(factory()) as Arc<dyn Middleware>);
        self.register(id, ClassEntry::Middleware(factory))
    }

    /// `true` if `id` resolves without a loader.
    #[must_use]
    pub fn is_known(&self, id: &str) -> bool {
        self.eager.contains_key(id)
    }

    /// Eager entry for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ClassEntry> {
        self.eager.get(id)
    }

    /// Deferred entry for `id`, regardless of any loader window.
    #[must_use]
    pub fn deferred(&self, id: &str) -> Option<&ClassEntry> {
        self.deferred.get(id)
    }

    /// Eager entry, else whatever the open loader window makes visible.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        id: &str,
        registration: Option<&LoaderRegistration<'a>>,
    ) -> Option<&'a ClassEntry> {
        self.eager
            .get(id)
            .or_else(|| registration.and_then(|r| r.lookup(id)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.eager.len() + self.deferred.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eager.is_empty() && self.deferred.is_empty()
    }

    /// All ids, eager first, each group sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&ControllerId> {
        let mut eager: Vec<&ControllerId> = self.eager.keys().collect();
        let mut deferred: Vec<&ControllerId> = self.deferred.keys().collect();
        eager.sort();
        deferred.sort();
        eager.extend(deferred);
        eager
    }
}
