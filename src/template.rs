//! Template rendering
//!
//! Renders JSON-shaped templates containing `{{ name }}` placeholders. All
//! placeholders are checked against the bindings before anything is
//! substituted, so a missing binding is reported by name instead of showing
//! up later as a JSON syntax error.
//!
//! String bindings are inserted JSON-escaped but without quotes, so the
//! template supplies the quotes (`"title": "{{tileTitle}}"`). Any other JSON
//! value is inserted as JSON text (`"tags": {{tags}}`).

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Dashboard template compiled into the binary
pub const EMBEDDED_DASHBOARD: &str = include_str!("../templates/dashboard.json");

/// Default template file looked up in the working directory
pub const DEFAULT_DASHBOARD_PATH: &str = "templates/dashboard.json";

/// Values substituted into a template, by placeholder name
pub type Bindings = BTreeMap<String, Value>;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unresolved template placeholders: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    #[error("Rendered template is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// Anything between double braces is a placeholder, whether or not its name
// could ever be bound
fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").expect("placeholder pattern is valid"))
}

fn is_binding_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// A loaded template
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a template from disk
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    /// The dashboard template: the file at `path` if it exists, else the
    /// embedded default
    pub fn dashboard(path: &Path) -> Result<Self, TemplateError> {
        if path.exists() {
            tracing::info!("Using dashboard template {}", path.display());
            Self::from_file(path)
        } else {
            tracing::info!(
                "Dashboard template {} not found, using embedded template",
                path.display()
            );
            Ok(Self::new(EMBEDDED_DASHBOARD))
        }
    }

    /// Distinct placeholder names, sorted
    pub fn placeholders(&self) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(&self.text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Substitute `bindings` and parse the result as JSON
    pub fn render(&self, bindings: &Bindings) -> Result<Value, TemplateError> {
        let missing: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| !is_binding_name(name) || !bindings.contains_key(name))
            .collect();

        if !missing.is_empty() {
            return Err(TemplateError::Unresolved(missing));
        }

        let rendered = placeholder_regex().replace_all(&self.text, |caps: &Captures| {
            // Presence checked above
            bindings.get(&caps[1]).map(binding_text).unwrap_or_default()
        });

        Ok(serde_json::from_str(&rendered)?)
    }
}

/// Text inserted for one binding
fn binding_text(value: &Value) -> String {
    match value {
        Value::String(s) => {
            let quoted = Value::String(s.clone()).to_string();
            quoted[1..quoted.len() - 1].to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings(pairs: &[(&str, Value)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_render_string_and_json_bindings() {
        let template = Template::new(r#"{"title": "{{ title }}", "tags": {{tags}}, "n": {{n}}}"#);
        let value = template
            .render(&bindings(&[
                ("title", json!("CPU")),
                ("tags", json!(["a", "b"])),
                ("n", json!(3)),
            ]))
            .unwrap();

        assert_eq!(value, json!({"title": "CPU", "tags": ["a", "b"], "n": 3}));
    }

    #[test]
    fn test_string_bindings_are_escaped() {
        let template = Template::new(r#"{"title": "Tile: {{title}}"}"#);
        let value = template
            .render(&bindings(&[("title", json!("say \"hi\"\nnow"))]))
            .unwrap();

        assert_eq!(value["title"], "Tile: say \"hi\"\nnow");
    }

    #[test]
    fn test_unresolved_placeholders_reported_before_parsing() {
        // Invalid JSON as well, but the missing bindings win
        let template = Template::new(r#"{"a": "{{zeta}}", "b": {{alpha}}, "c": "{{zeta}}" "#);
        let err = template.render(&Bindings::new()).unwrap_err();

        match err {
            TemplateError::Unresolved(names) => assert_eq!(names, vec!["alpha", "zeta"]),
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn test_non_identifier_placeholders_are_unresolved() {
        let template = Template::new(r#"{"title": "{{tile-title}}", "ws": "{{ workspace.id }}"}"#);

        // Even a binding under the exact name cannot satisfy them
        let err = template
            .render(&bindings(&[("tile-title", json!("CPU"))]))
            .unwrap_err();

        match err {
            TemplateError::Unresolved(names) => {
                assert_eq!(names, vec!["tile-title", "workspace.id"])
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_template_is_parse_error() {
        let template = Template::new(r#"{"a": "{{x}}""#);
        let err = template.render(&bindings(&[("x", json!("1"))])).unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }

    #[test]
    fn test_unused_bindings_are_ignored() {
        let template = Template::new(r#"{"a": 1}"#);
        let value = template.render(&bindings(&[("x", json!("unused"))])).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_placeholders_are_distinct_and_sorted() {
        let template = Template::new("{{b}} {{ a }} {{b}} {{not a placeholder");
        let names: Vec<String> = template.placeholders().into_iter().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_embedded_dashboard_renders() {
        let template = Template::new(EMBEDDED_DASHBOARD);
        let value = template
            .render(&bindings(&[
                ("workspaceId", json!("space-1")),
                ("dataSourceId", json!("config-1")),
                ("dataStreamId", json!("datastream-1")),
                ("tileTitle", json!("My tile")),
                ("generatedAt", json!("2026-01-01T00:00:00Z")),
            ]))
            .unwrap();

        assert_eq!(value["_type"], "layout/grid");
        assert_eq!(value["contents"][0]["config"]["dataStream"]["id"], "datastream-1");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Template::from_file(Path::new("/nonexistent/dir/template.json")).unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }

    #[test]
    fn test_dashboard_falls_back_to_embedded() {
        let template = Template::dashboard(Path::new("/nonexistent/dir/template.json")).unwrap();
        assert!(template.placeholders().contains("dataStreamId"));
    }
}
