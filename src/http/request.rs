use http::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Header storage; names are shared `Arc<str>` since they repeat across requests.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Well-known routing attribute names.
pub mod attr {
    pub const MODULE: &str = "module";
    pub const CONTROLLER: &str = "controller";
    pub const ACTION: &str = "action";
    pub const ID: &str = "id";
    pub const FORMAT: &str = "format";

    /// Attributes reset to null by a non-preserving dispatch.
    pub const ROUTING: [&str; 5] = [MODULE, CONTROLLER, ACTION, ID, FORMAT];
}

/// Request identifier backed by a ULID, used to correlate log lines of one run.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Reuse an upstream `x-request-id` when it is a valid ULID.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<RequestId>()
            .map_err(|_| serde::de::Error::custom("invalid request id"))
    }
}

/// Inbound request value.
///
/// Attributes hold routing data (`module`, `controller`, `action`, `id`,
/// `format`) plus anything earlier middleware wants to pass along. The map is
/// shared behind an `Arc`; [`Request::with_attribute`] clones it only when the
/// value is actually shared, so deriving a request is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    request_id: RequestId,
    method: Method,
    path: String,
    headers: HeaderVec,
    attributes: Arc<HashMap<String, Value>>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new(Method::GET, "/")
    }
}

impl Request {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.to_string(),
            headers: HeaderVec::new(),
            attributes: Arc::new(HashMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Return a copy with the header set, replacing any previous value.
    ///
    /// Setting `x-request-id` to a valid ULID also adopts it as the request id.
    #[must_use]
    pub fn with_header(&self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        if name.eq_ignore_ascii_case("x-request-id") {
            next.request_id = RequestId::from_header_or_new(Some(value.as_str()));
        }
        next.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        next.headers.push((Arc::from(name), value));
        next
    }

    #[inline]
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String view of an attribute; `None` when absent, null or not a string.
    #[inline]
    #[must_use]
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Return a copy with `name` set to `value`.
    #[must_use]
    pub fn with_attribute(&self, name: &str, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.attributes).insert(name.to_string(), value.into());
        next
    }

    /// Return a copy with every `(name, value)` pair applied in order.
    #[must_use]
    pub fn with_attributes<I, K, V>(&self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut next = self.clone();
        let map = Arc::make_mut(&mut next.attributes);
        for (k, v) in attributes {
            map.insert(k.into(), v.into());
        }
        next
    }

    #[must_use]
    pub fn without_attribute(&self, name: &str) -> Self {
        if !self.attributes.contains_key(name) {
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.attributes).remove(name);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_attribute_leaves_original_untouched() {
        let base = Request::default().with_attribute(attr::CONTROLLER, "index");
        let derived = base.with_attribute(attr::CONTROLLER, "other");

        assert_eq!(base.attribute_str(attr::CONTROLLER), Some("index"));
        assert_eq!(derived.attribute_str(attr::CONTROLLER), Some("other"));
        assert_eq!(base.request_id(), derived.request_id());
    }

    #[test]
    fn null_and_non_string_attributes_have_no_str_view() {
        let req = Request::default()
            .with_attribute(attr::MODULE, Value::Null)
            .with_attribute(attr::ID, 42);

        assert!(req.attribute(attr::MODULE).is_some());
        assert_eq!(req.attribute_str(attr::MODULE), None);
        assert_eq!(req.attribute_str(attr::ID), None);
        assert_eq!(req.attribute(attr::ID), Some(&Value::from(42)));
    }

    #[test]
    fn with_attributes_applies_in_order() {
        let req = Request::default().with_attributes([
            (attr::ACTION, Value::from("one")),
            (attr::ACTION, Value::from("two")),
        ]);
        assert_eq!(req.attribute_str(attr::ACTION), Some("two"));
        assert!(req.without_attribute(attr::ACTION).attribute(attr::ACTION).is_none());
    }

    #[test]
    fn headers_are_case_insensitive_and_replace() {
        let req = Request::default()
            .with_header("Accept", "text/html")
            .with_header("accept", "application/json");
        assert_eq!(req.header("ACCEPT"), Some("application/json"));
        assert_eq!(req.headers().len(), 1);
    }

    #[test]
    fn request_id_adopted_from_header() {
        let upstream = RequestId::new();
        let req = Request::default().with_header("x-request-id", upstream.to_string());
        assert_eq!(req.request_id(), upstream);

        let garbage = Request::default().with_header("x-request-id", "not-a-ulid");
        assert_ne!(garbage.request_id(), upstream);
    }
}
