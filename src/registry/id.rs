use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Segment separator inside a [`ControllerId`].
pub const SEPARATOR: &str = "::";

/// Fully-qualified controller name, e.g. `app::controllers::IndexController`.
///
/// Cheap to clone; hashes and compares like the underlying `str`, so maps
/// keyed by `ControllerId` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(Arc<str>);

impl ControllerId {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    /// Join `prefix` and `name` with the separator; an empty prefix yields `name`.
    #[must_use]
    pub fn join(prefix: &str, name: &str) -> Self {
        if prefix.is_empty() {
            Self::new(name)
        } else {
            Self(Arc::from(format!("{prefix}{SEPARATOR}{name}")))
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Last segment, the bare controller name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// The part after `namespace::`, or `None` when the id lives elsewhere.
    #[must_use]
    pub fn strip_namespace(&self, namespace: &str) -> Option<&str> {
        self.0
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .filter(|rest| !rest.is_empty())
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControllerId({:?})", &*self.0)
    }
}

impl Borrow<str> for ControllerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ControllerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ControllerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ControllerId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}
