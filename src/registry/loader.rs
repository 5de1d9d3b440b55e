use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::core::{ClassEntry, ControllerRegistry};
use super::id::{ControllerId, SEPARATOR};
use crate::config::{fill_pattern, LoaderOptions, RoutingOptions};

/// Maps controller ids onto source files under a root directory.
///
/// With namespace `app::controllers`, root `./controllers` and pattern
/// `%s.rs`, the id `app::controllers::admin::OtherController` maps to
/// `./controllers/admin/OtherController.rs`. Ids outside the namespace map
/// to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerLoader {
    root: PathBuf,
    namespace: Option<String>,
    pattern: String,
}

impl ControllerLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, namespace: Option<&str>, pattern: Option<&str>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            pattern: pattern
                .map(str::to_string)
                .unwrap_or_else(|| LoaderOptions::default().pattern),
        }
    }

    /// Loader described by the `controller.loader` section.
    #[must_use]
    pub fn from_options(options: &RoutingOptions) -> Self {
        Self::new(
            options.loader.path.clone(),
            options.namespace(),
            Some(options.loader.pattern.as_str()),
        )
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Candidate source file for `id`, whether or not it exists.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<PathBuf> {
        let relative = match &self.namespace {
            Some(ns) => ControllerId::new(id).strip_namespace(ns).map(str::to_string)?,
            None => id.to_string(),
        };

        let segments: Vec<&str> = relative.split(SEPARATOR).collect();
        // Segments become path components; refuse anything that could leave the root.
        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == ".." || s.contains(['/', '\\']))
        {
            debug!(controller_id = %id, "Identifier does not map to a loadable path");
            return None;
        }

        Some(self.root.join(fill_pattern(&self.pattern, &segments.join("/"))))
    }

    /// Open a loader window over the deferred entries of `registry`.
    ///
    /// The window closes when the returned guard is unregistered or dropped.
    #[must_use = "the loader window closes as soon as the registration is dropped"]
    pub fn register<'r>(&'r self, registry: &'r ControllerRegistry) -> LoaderRegistration<'r> {
        debug!(
            root = %self.root.display(),
            namespace = ?self.namespace,
            pattern = %self.pattern,
            "Loader registered"
        );
        LoaderRegistration {
            loader: self,
            registry,
            active: true,
        }
    }
}

/// An open loader window.
///
/// While active, [`lookup`](Self::lookup) returns deferred entries whose
/// source file exists. [`unregister`](Self::unregister) closes the window and
/// may be called any number of times; dropping the guard closes it too.
#[derive(Debug)]
pub struct LoaderRegistration<'r> {
    loader: &'r ControllerLoader,
    registry: &'r ControllerRegistry,
    active: bool,
}

impl<'r> LoaderRegistration<'r> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&'r ClassEntry> {
        if !self.active {
            return None;
        }

        let file = self.loader.locate(id)?;
        if !file.is_file() {
            trace!(controller_id = %id, file = %file.display(), "No source file for identifier");
            return None;
        }

        let entry = self.registry.deferred(id);
        debug!(
            controller_id = %id,
            file = %file.display(),
            found = entry.is_some(),
            "Loader lookup"
        );
        entry
    }

    pub fn unregister(&mut self) {
        if self.active {
            self.active = false;
            debug!(root = %self.loader.root.display(), "Loader unregistered");
        }
    }
}

impl Drop for LoaderRegistration<'_> {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ActionContext, Controller};
    use crate::http::Response;

    struct Noop;
    impl Controller for Noop {
        fn invoke(&self, _action: &str, _cx: &ActionContext<'_>) -> Option<Response> {
            None
        }
    }

    #[test]
    fn locate_strips_namespace_and_applies_pattern() {
        let loader = ControllerLoader::new("/srv/ctl", Some("app::controllers"), None);
        assert_eq!(
            loader.locate("app::controllers::admin::OtherController"),
            Some(PathBuf::from("/srv/ctl/admin/OtherController.rs"))
        );
        assert_eq!(loader.locate("elsewhere::IndexController"), None);
    }

    #[test]
    fn locate_without_namespace_uses_whole_id() {
        let loader = ControllerLoader::new("ctl", None, Some("%s.controller"));
        assert_eq!(
            loader.locate("IndexController"),
            Some(PathBuf::from("ctl/IndexController.controller"))
        );
    }

    #[test]
    fn locate_refuses_escaping_segments() {
        let loader = ControllerLoader::new("ctl", None, None);
        assert_eq!(loader.locate("..::IndexController"), None);
        assert_eq!(loader.locate("a/b::IndexController"), None);
        assert_eq!(loader.locate("a::::IndexController"), None);
    }

    #[test]
    fn lookup_needs_file_and_open_window() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("IndexController.rs"), "// controller\n").unwrap();

        let mut registry = ControllerRegistry::new();
        registry
            .defer_controller("app::IndexController", || Noop)
            .defer_controller("app::MissingController", || Noop);

        let loader = ControllerLoader::new(dir.path(), Some("app"), None);
        let mut registration = loader.register(&registry);
        assert!(registration.lookup("app::IndexController").is_some());
        assert!(registration.lookup("app::MissingController").is_none());

        registration.unregister();
        registration.unregister();
        assert!(!registration.is_active());
        assert!(registration.lookup("app::IndexController").is_none());
    }

    #[test]
    fn file_without_deferred_entry_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GhostController.rs"), "").unwrap();

        let registry = ControllerRegistry::new();
        let loader = ControllerLoader::new(dir.path(), None, None);
        let registration = loader.register(&registry);
        assert!(registration.lookup("GhostController").is_none());
    }
}
