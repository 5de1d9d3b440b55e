use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::request::HeaderVec;

/// Outcome value produced by controller actions and forwarded by middleware.
///
/// [`Response::default`] is what a pipeline run starts from: a 404 with a
/// null body. A dispatch that finds no route hands this value back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    status: u16,
    #[serde(skip_serializing)]
    headers: HeaderVec,
    body: Value,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(404)
    }
}

impl Response {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Value::Null,
        }
    }

    /// Create a JSON response with the content type set
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn with_status(&self, status: u16) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        next.headers.push((Arc::from(name), value.into()));
        next
    }

    #[must_use]
    pub fn with_body(&self, body: Value) -> Self {
        Self {
            body,
            ..self.clone()
        }
    }

    /// Reason phrase for the status, `""` for codes `http` does not know.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
    }
}
