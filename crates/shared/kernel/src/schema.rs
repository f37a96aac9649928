//! # Module configuration schema
//!
//! Explicit, field-by-field parsing of a module's raw declaration into a
//! [`ModuleConfig`]. Malformed input is an expected outcome, so every check
//! returns a [`ValidationError`] naming the offending field path instead of
//! panicking.
//!
//! Accepted shape (unknown keys are rejected):
//!
//! ```json
//! {
//!   "moduleName": "blog",
//!   "dashboardRoutes": [
//!     { "title": "Posts", "url": "blog", "iconRef": "file-text",
//!       "subItems": [{ "title": "Drafts", "url": "drafts" }] }
//!   ],
//!   "dependencies": ["media"]
//! }
//! ```

use mosaic_domain::module::{DashboardEntry, IconRef, ModuleConfig, SubEntry};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use strum::VariantNames;

const MODULE_KEYS: &[&str] = &["moduleName", "dashboardRoutes", "dependencies"];
const ENTRY_KEYS: &[&str] = &["title", "url", "iconRef", "subItems"];
const SUB_ENTRY_KEYS: &[&str] = &["title", "url"];

/// A rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{path}` {reason}")]
pub struct ValidationError {
    /// Dotted path into the raw value, e.g. `dashboardRoutes[1].iconRef`; `$` is the root.
    pub path: String,
    pub reason: ValidationReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("is required")]
    Missing,
    #[error("must be {expected}")]
    WrongType { expected: &'static str },
    #[error("must not be empty")]
    Empty,
    #[error("is not a valid module name: `{value}`")]
    InvalidName { value: String },
    #[error("is not a known icon: `{value}` (expected one of {known})")]
    UnknownIcon { value: String, known: String },
    #[error("is not a well-formed relative path: `{value}`")]
    MalformedPath { value: String },
    #[error("lists `{value}` more than once")]
    DuplicateDependency { value: String },
    #[error("is not a recognised field")]
    UnknownField,
}

/// Validates an arbitrary value against the module schema.
///
/// Pure and idempotent: serializing the returned config and validating it
/// again yields an equal value.
///
/// # Errors
/// Returns the first [`ValidationError`] found, walking fields in declaration order.
pub fn validate(raw: &Value) -> Result<ModuleConfig, ValidationError> {
    let root = FieldPath::root();
    let object = object(raw, &root)?;
    reject_unknown(object, &root, MODULE_KEYS)?;

    let module_name = module_name(required(object, "moduleName", &root)?, &root.key("moduleName"))?;
    let dashboard_routes = optional_list(object, "dashboardRoutes", &root, dashboard_entry)?;
    let dependencies = dependencies(object, &root)?;

    Ok(ModuleConfig { module_name, dashboard_routes, dependencies })
}

fn dashboard_entry(value: &Value, path: &FieldPath) -> Result<DashboardEntry, ValidationError> {
    let object = object(value, path)?;
    reject_unknown(object, path, ENTRY_KEYS)?;

    Ok(DashboardEntry {
        title: non_empty_string(required(object, "title", path)?, &path.key("title"))?,
        url: relative_path(required(object, "url", path)?, &path.key("url"))?,
        icon_ref: icon(required(object, "iconRef", path)?, &path.key("iconRef"))?,
        sub_items: optional_list(object, "subItems", path, sub_entry)?,
    })
}

fn sub_entry(value: &Value, path: &FieldPath) -> Result<SubEntry, ValidationError> {
    let object = object(value, path)?;
    reject_unknown(object, path, SUB_ENTRY_KEYS)?;

    Ok(SubEntry {
        title: non_empty_string(required(object, "title", path)?, &path.key("title"))?,
        url: relative_path(required(object, "url", path)?, &path.key("url"))?,
    })
}

fn dependencies(object: &Map<String, Value>, root: &FieldPath) -> Result<Vec<String>, ValidationError> {
    let names = optional_list(object, "dependencies", root, |value, path| module_name(value, path))?;

    let mut seen = fxhash::FxHashSet::default();
    for (index, name) in names.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            return Err(root
                .key("dependencies")
                .index(index)
                .reject(ValidationReason::DuplicateDependency { value: name.clone() }));
        }
    }
    Ok(names)
}

// --- Field parsers ---

fn object<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| path.reject(ValidationReason::WrongType { expected: "an object" }))
}

fn required<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<&'a Value, ValidationError> {
    match object.get(key) {
        None | Some(Value::Null) => Err(path.key(key).reject(ValidationReason::Missing)),
        Some(value) => Ok(value),
    }
}

fn optional_list<T>(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    parse: impl Fn(&Value, &FieldPath) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let path = path.key(key);
    match object.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            items.iter().enumerate().map(|(i, item)| parse(item, &path.index(i))).collect()
        },
        Some(_) => Err(path.reject(ValidationReason::WrongType { expected: "an array" })),
    }
}

fn reject_unknown(
    object: &Map<String, Value>,
    path: &FieldPath,
    known: &[&str],
) -> Result<(), ValidationError> {
    match object.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(path.key(key).reject(ValidationReason::UnknownField)),
        None => Ok(()),
    }
}

fn string<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| path.reject(ValidationReason::WrongType { expected: "a string" }))
}

fn non_empty_string(value: &Value, path: &FieldPath) -> Result<String, ValidationError> {
    let text = string(value, path)?.trim();
    if text.is_empty() {
        return Err(path.reject(ValidationReason::Empty));
    }
    Ok(text.to_owned())
}

fn module_name(value: &Value, path: &FieldPath) -> Result<String, ValidationError> {
    let name = non_empty_string(value, path)?;
    if is_module_name(&name) {
        Ok(name)
    } else {
        Err(path.reject(ValidationReason::InvalidName { value: name }))
    }
}

fn icon(value: &Value, path: &FieldPath) -> Result<IconRef, ValidationError> {
    let name = string(value, path)?;
    IconRef::from_str(name).map_err(|_| {
        path.reject(ValidationReason::UnknownIcon {
            value: name.to_owned(),
            known: IconRef::VARIANTS.join(", "),
        })
    })
}

/// Accepts `a/b-c` or `/a/b-c/`; returns `a/b-c`.
fn relative_path(value: &Value, path: &FieldPath) -> Result<String, ValidationError> {
    let raw = string(value, path)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(path.reject(ValidationReason::Empty));
    }

    let normalized = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let normalized = normalized.strip_suffix('/').unwrap_or(normalized);
    if is_relative_path(normalized) {
        Ok(normalized.to_owned())
    } else {
        Err(path.reject(ValidationReason::MalformedPath { value: raw.to_owned() }))
    }
}

pub(crate) fn is_module_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub(crate) fn is_relative_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || "-_.~".contains(c))
        })
}

/// Builds the human-readable location of a field inside the raw value.
#[derive(Debug, Clone)]
struct FieldPath(String);

impl FieldPath {
    const fn root() -> Self {
        Self(String::new())
    }

    fn key(&self, key: &str) -> Self {
        if self.0.is_empty() { Self(key.to_owned()) } else { Self(format!("{}.{key}", self.0)) }
    }

    fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    fn reject(&self, reason: ValidationReason) -> ValidationError {
        ValidationError { path: self.to_string(), reason }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() { f.write_str("$") } else { f.write_str(&self.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blog() -> Value {
        json!({
            "moduleName": "blog",
            "dashboardRoutes": [{
                "title": "Posts",
                "url": "/blog/",
                "iconRef": "file-text",
                "subItems": [{ "title": "Drafts", "url": "drafts" }]
            }],
            "dependencies": ["media"]
        })
    }

    fn reason_at(raw: &Value) -> (String, ValidationReason) {
        let err = validate(raw).unwrap_err();
        (err.path, err.reason)
    }

    #[test]
    fn accepts_full_declaration_and_normalizes_urls() {
        let config = validate(&blog()).unwrap();
        assert_eq!(config.module_name, "blog");
        assert_eq!(config.dashboard_routes[0].url, "blog");
        assert_eq!(config.dashboard_routes[0].icon_ref, IconRef::FileText);
        assert_eq!(config.dashboard_routes[0].sub_items[0].url, "drafts");
        assert_eq!(config.dependencies, vec!["media"]);
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let config = validate(&json!({ "moduleName": "bare", "dependencies": null })).unwrap();
        assert!(config.dashboard_routes.is_empty());
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn rejects_non_object_root() {
        assert_eq!(reason_at(&json!([])), ("$".to_owned(), ValidationReason::WrongType {
            expected: "an object"
        }));
    }

    #[test]
    fn rejects_empty_title_with_field_path() {
        let mut raw = blog();
        raw["dashboardRoutes"][0]["title"] = json!("  ");
        assert_eq!(reason_at(&raw), ("dashboardRoutes[0].title".to_owned(), ValidationReason::Empty));
    }

    #[test]
    fn rejects_missing_module_name() {
        let mut raw = blog();
        raw.as_object_mut().unwrap().remove("moduleName");
        assert_eq!(reason_at(&raw), ("moduleName".to_owned(), ValidationReason::Missing));
    }

    #[test]
    fn rejects_unknown_icon() {
        let mut raw = blog();
        raw["dashboardRoutes"][0]["iconRef"] = json!("rocket");
        let (path, reason) = reason_at(&raw);
        assert_eq!(path, "dashboardRoutes[0].iconRef");
        assert!(matches!(reason, ValidationReason::UnknownIcon { value, .. } if value == "rocket"));
    }

    #[test]
    fn rejects_malformed_sub_item_paths() {
        for bad in ["../admin", "a//b", "https://evil.example", "a b", "?q=1"] {
            let mut raw = blog();
            raw["dashboardRoutes"][0]["subItems"][0]["url"] = json!(bad);
            let (path, reason) = reason_at(&raw);
            assert_eq!(path, "dashboardRoutes[0].subItems[0].url", "input {bad}");
            assert!(matches!(reason, ValidationReason::MalformedPath { .. }), "input {bad}");
        }
    }

    #[test]
    fn rejects_duplicate_dependencies() {
        let mut raw = blog();
        raw["dependencies"] = json!(["media", "media"]);
        let (path, reason) = reason_at(&raw);
        assert_eq!(path, "dependencies[1]");
        assert_eq!(reason, ValidationReason::DuplicateDependency { value: "media".to_owned() });
    }

    #[test]
    fn rejects_unknown_fields() {
        let mut raw = blog();
        raw["dashboardRoutes"][0]["icon"] = json!("file-text");
        assert_eq!(
            reason_at(&raw),
            ("dashboardRoutes[0].icon".to_owned(), ValidationReason::UnknownField)
        );
    }

    #[test]
    fn rejects_wrong_container_types() {
        let mut raw = blog();
        raw["dashboardRoutes"] = json!({ "title": "Posts" });
        assert_eq!(
            reason_at(&raw),
            ("dashboardRoutes".to_owned(), ValidationReason::WrongType { expected: "an array" })
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let first = validate(&blog()).unwrap();
        let second = validate(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
