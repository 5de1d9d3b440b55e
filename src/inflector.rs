//! # Inflector
//!
//! Name canonicalization and inflection for route segments.
//!
//! Route attributes (`module`, `controller`, `action`) arrive as free-form
//! strings. Before they are used to build a controller identifier they must
//! already be in canonical form: lowercase words joined by single dashes.
//! [`canonicalize`] is the oracle for that check, and [`Inflection`] turns a
//! canonical token into the fragment used in a controller name.
//!
//! ```rust
//! use actionrouter::inflector::{canonicalize, Inflection};
//!
//! assert_eq!(canonicalize("SomeThing_else"), "some-thing-else");
//! assert_eq!(Inflection::Camelize.apply("some-thing"), "SomeThing");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Normalize a route segment into its canonical token.
///
/// A lowercase letter or digit followed by an uppercase letter starts a new
/// word, every run of non-alphanumeric characters separates words, words are
/// lowercased and joined with `-`. The result is idempotent:
/// `canonicalize(&canonicalize(s)) == canonicalize(s)`.
#[must_use]
pub fn canonicalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut pending_separator = false;
    let mut prev_lower_or_digit = false;

    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            pending_separator = !out.is_empty();
            prev_lower_or_digit = false;
            continue;
        }

        if ch.is_uppercase() && prev_lower_or_digit {
            pending_separator = true;
        }

        if pending_separator {
            out.push('-');
            pending_separator = false;
        }

        // Some lowercase expansions carry combining marks (`İ` -> `i\u{307}`).
        out.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
        prev_lower_or_digit = ch.is_lowercase() || ch.is_numeric();
    }

    out
}

/// `true` if `input` is already in canonical form.
#[inline]
#[must_use]
pub fn is_canonical(input: &str) -> bool {
    canonicalize(input) == input
}

fn segments(token: &str) -> impl Iterator<Item = &str> {
    token
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"other-thing"` → `"OtherThing"`
#[must_use]
pub fn camelize(token: &str) -> String {
    segments(token).map(capitalize).collect()
}

/// `"other-thing"` → `"otherThing"`
#[must_use]
pub fn variablize(token: &str) -> String {
    let camel = camelize(token);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"other-thing"` → `"other_thing"`
#[must_use]
pub fn underscorize(token: &str) -> String {
    canonicalize(token).replace('-', "_")
}

/// Signature accepted by [`Inflection::custom`].
pub type InflectFn = dyn Fn(&str) -> String + Send + Sync;

/// Transformation applied to a canonical controller token before it is
/// substituted into the controller pattern.
///
/// Built-in variants deserialize from their lowercase name (`"camelize"`,
/// `"variablize"`, `"dasherize"`, `"underscorize"`). [`Inflection::Custom`]
/// can only be constructed in code.
#[derive(Clone, Default)]
pub enum Inflection {
    #[default]
    Camelize,
    Variablize,
    Dasherize,
    Underscorize,
    Custom {
        name: Arc<str>,
        func: Arc<InflectFn>,
    },
}

impl Inflection {
    /// Wrap an arbitrary `&str -> String` function.
    pub fn custom<F>(name: &str, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Inflection::Custom {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    /// Look up a built-in inflection by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "camelize" => Some(Inflection::Camelize),
            "variablize" => Some(Inflection::Variablize),
            "dasherize" | "canonicalize" => Some(Inflection::Dasherize),
            "underscorize" => Some(Inflection::Underscorize),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Inflection::Camelize => "camelize",
            Inflection::Variablize => "variablize",
            Inflection::Dasherize => "dasherize",
            Inflection::Underscorize => "underscorize",
            Inflection::Custom { name, .. } => name,
        }
    }

    #[must_use]
    pub fn apply(&self, token: &str) -> String {
        match self {
            Inflection::Camelize => camelize(token),
            Inflection::Variablize => variablize(token),
            Inflection::Dasherize => canonicalize(token),
            Inflection::Underscorize => underscorize(token),
            Inflection::Custom { func, .. } => func(token),
        }
    }
}

impl fmt::Debug for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Inflection").field(&self.name()).finish()
    }
}

impl PartialEq for Inflection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Inflection::Custom { func: a, .. }, Inflection::Custom { func: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (Inflection::Custom { .. }, _) | (_, Inflection::Custom { .. }) => false,
            _ => self.name() == other.name(),
        }
    }
}

impl Serialize for Inflection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Inflection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Inflection::from_name(&name).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown inflection '{name}', expected one of camelize, variablize, dasherize, underscorize"
            ))
        })
    }
}
