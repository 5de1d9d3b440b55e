use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use super::error::ValidationIssue;
use crate::inflector::{is_canonical, Inflection};

/// Placeholder substituted by [`fill_pattern`].
const PLACEHOLDER: &str = "%s";

/// Substitute `value` for the first `%s` in `pattern`.
#[must_use]
pub fn fill_pattern(pattern: &str, value: &str) -> String {
    pattern.replacen(PLACEHOLDER, value, 1)
}

fn check_pattern(key: &str, pattern: &str, issues: &mut Vec<ValidationIssue>) {
    match pattern.matches(PLACEHOLDER).count() {
        1 => {}
        0 => issues.push(ValidationIssue::new(key, format!("'{pattern}' has no %s placeholder"))),
        n => issues.push(ValidationIssue::new(
            key,
            format!("'{pattern}' has {n} %s placeholders, expected one"),
        )),
    }
}

/// Loader patterns are joined onto the loader root and must stay below it.
fn check_relative_pattern(key: &str, pattern: &str, issues: &mut Vec<ValidationIssue>) {
    let path = Path::new(pattern);
    let escapes = path.has_root()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        issues.push(ValidationIssue::new(
            key,
            format!("'{pattern}' must be a relative path below loader.path"),
        ));
    }
}

fn check_token(key: &str, token: &str, issues: &mut Vec<ValidationIssue>) {
    if !is_canonical(token) {
        issues.push(ValidationIssue::new(
            key,
            format!("'{token}' is not a canonical token and can never match a request"),
        ));
    }
}

/// Settings for the scoped controller loader (`controller.loader`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderOptions {
    /// Open a loader window for identifiers that are not eagerly registered
    pub enabled: bool,
    /// Root directory scanned for controller sources
    pub path: PathBuf,
    /// File-name template applied to the namespace-relative path
    pub pattern: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("controllers"),
            pattern: "%s.rs".to_string(),
        }
    }
}

/// Routing options, the `controller` namespace of the application config.
///
/// Loaded once and read-only afterwards. Keys are camelCase in config files
/// (`nameSpace`, `defaultController`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RoutingOptions {
    /// Prefix for every controller identifier, `::` separated
    pub name_space: String,
    /// Module token → identifier fragment
    pub modules: BTreeMap<String, String>,
    pub default_module: String,
    pub default_controller: String,
    pub default_action: String,
    /// Template for the controller name, `%s` receives the inflected token
    pub controller_pattern: String,
    pub controller_inflection: Inflection,
    pub loader: LoaderOptions,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            name_space: String::new(),
            modules: BTreeMap::new(),
            default_module: String::new(),
            default_controller: "index".to_string(),
            default_action: "index".to_string(),
            controller_pattern: "%sController".to_string(),
            controller_inflection: Inflection::Camelize,
            loader: LoaderOptions::default(),
        }
    }
}

impl RoutingOptions {
    /// Namespace with surrounding `::` removed; `None` when empty.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        let trimmed = trim_separators(&self.name_space);
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Identifier fragment for a module token, surrounding `::` removed.
    #[must_use]
    pub fn module_fragment(&self, module: &str) -> Option<&str> {
        self.modules.get(module).map(|f| trim_separators(f))
    }

    /// Controller name for a canonical token, e.g. `"other"` → `"OtherController"`.
    #[must_use]
    pub fn controller_name(&self, token: &str) -> String {
        fill_pattern(&self.controller_pattern, &self.controller_inflection.apply(token))
    }

    /// Check the options for values that can never work.
    ///
    /// Patterns must hold exactly one `%s`; module keys and defaults must be
    /// canonical; module fragments must not be empty.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        check_pattern("controller.controllerPattern", &self.controller_pattern, &mut issues);
        check_pattern("controller.loader.pattern", &self.loader.pattern, &mut issues);
        check_relative_pattern("controller.loader.pattern", &self.loader.pattern, &mut issues);
        check_token("controller.defaultModule", &self.default_module, &mut issues);
        check_token("controller.defaultController", &self.default_controller, &mut issues);
        check_token("controller.defaultAction", &self.default_action, &mut issues);

        if self.default_controller.is_empty() {
            issues.push(ValidationIssue::new(
                "controller.defaultController",
                "must not be empty",
            ));
        }

        if !self.default_module.is_empty() && !self.modules.contains_key(&self.default_module) {
            issues.push(ValidationIssue::new(
                "controller.defaultModule",
                format!("'{}' is not listed under modules", self.default_module),
            ));
        }

        for (token, fragment) in &self.modules {
            let key = format!("controller.modules.{token}");
            if token.is_empty() {
                issues.push(ValidationIssue::new(key, "module token must not be empty"));
                continue;
            }
            check_token(&key, token, &mut issues);
            if trim_separators(fragment).is_empty() {
                issues.push(ValidationIssue::new(key, "module fragment must not be empty"));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

pub(crate) fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| c == ':' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventions() {
        let opts = RoutingOptions::default();
        assert_eq!(opts.default_controller, "index");
        assert_eq!(opts.default_action, "index");
        assert_eq!(opts.controller_pattern, "%sController");
        assert_eq!(opts.controller_inflection, Inflection::Camelize);
        assert!(!opts.loader.enabled);
        assert_eq!(opts.loader.pattern, "%s.rs");
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn controller_name_inflects_then_fills() {
        let opts = RoutingOptions::default();
        assert_eq!(opts.controller_name("index"), "IndexController");
        assert_eq!(opts.controller_name("user-profile"), "UserProfileController");

        let snake = RoutingOptions {
            controller_pattern: "%s_controller".into(),
            controller_inflection: Inflection::Underscorize,
            ..RoutingOptions::default()
        };
        assert_eq!(snake.controller_name("user-profile"), "user_profile_controller");
    }

    #[test]
    fn namespace_and_fragments_are_trimmed() {
        let mut opts = RoutingOptions {
            name_space: "::app::controllers::".into(),
            ..RoutingOptions::default()
        };
        opts.modules.insert("adm".into(), "::admin::".into());
        assert_eq!(opts.namespace(), Some("app::controllers"));
        assert_eq!(opts.module_fragment("adm"), Some("admin"));
        assert_eq!(opts.module_fragment("nope"), None);

        assert_eq!(RoutingOptions::default().namespace(), None);
    }

    #[test]
    fn validate_reports_every_issue() {
        let mut opts = RoutingOptions {
            controller_pattern: "Controller".into(),
            default_controller: "Index".into(),
            ..RoutingOptions::default()
        };
        opts.loader.pattern = "%s/%s.rs".into();
        opts.modules.insert("Admin".into(), "admin".into());
        opts.modules.insert("blog".into(), "::".into());

        let issues = opts.validate().unwrap_err();
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert!(keys.contains(&"controller.controllerPattern"));
        assert!(keys.contains(&"controller.loader.pattern"));
        assert!(keys.contains(&"controller.defaultController"));
        assert!(keys.contains(&"controller.modules.Admin"));
        assert!(keys.contains(&"controller.modules.blog"));
    }

    #[test]
    fn loader_pattern_must_stay_below_root() {
        for pattern in ["/srv/%s.rs", "../%s.rs", "lib/../../%s.rs"] {
            let mut opts = RoutingOptions::default();
            opts.loader.pattern = pattern.into();
            let issues = opts.validate().unwrap_err();
            assert_eq!(issues.len(), 1, "pattern: {pattern}");
            assert_eq!(issues[0].key, "controller.loader.pattern");
        }

        let mut nested = RoutingOptions::default();
        nested.loader.pattern = "src/%s.rs".into();
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn unknown_default_module_is_rejected() {
        let opts = RoutingOptions {
            default_module: "adm".into(),
            ..RoutingOptions::default()
        };
        let issues = opts.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "controller.defaultModule");
    }
}
