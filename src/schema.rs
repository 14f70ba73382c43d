//! Declared property schema.
//!
//! Schema files look like:
//!
//! ```yaml
//! schema:
//!   properties:
//!     - property: server.port
//!       annotations: [required]
//!       default: 8080
//!       description: "Port the service listens on"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Tag attached to a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    Required,
    Optional,
    Deprecated,
}

impl Annotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::Required => "required",
            Annotation::Optional => "optional",
            Annotation::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named entry of the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Dotted path of the property in configuration documents.
    #[serde(rename = "property")]
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub default: Value,
    #[serde(default)]
    pub description: String,
}

impl Property {
    /// Create a property with no annotations, null default and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            default: Value::Null,
            description: String::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_annotation(&self, annotation: Annotation) -> bool {
        self.annotations.contains(&annotation)
    }

    /// Whether a missing value for this property is a flaw.
    pub fn is_required(&self) -> bool {
        self.has_annotation(Annotation::Required)
    }
}

/// Ordered list of declared properties.
///
/// Declaration order is the output order of validation results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Schema {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Set of declared names, for repeated membership checks.
    pub fn declared_names(&self) -> HashSet<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Names declared more than once, in first-repeat order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for property in &self.properties {
            let name = property.name.as_str();
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Log duplicate declarations. Each duplicate still yields its own verdict.
    pub fn warn_duplicates(&self) {
        for name in self.duplicate_names() {
            warn!(property = %name, "Property declared more than once in schema");
        }
    }
}

/// Top-level shape of a schema file.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchemaFile {
    #[serde(default)]
    pub schema: Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA_YAML: &str = r#"
schema:
  properties:
  - property: mandatory_valid
    annotations:
    - required
    description: "description"
    default: 123
  - property: optional_present
    annotations:
    - optional
    descriptions: "typo is ignored"
    default: 123
  - property: bare
"#;

    #[test]
    fn test_parse_schema_file() {
        let file: SchemaFile = serde_yaml::from_str(SCHEMA_YAML).unwrap();
        let props = &file.schema.properties;

        assert_eq!(props.len(), 3);
        assert_eq!(props[0].name, "mandatory_valid");
        assert_eq!(props[0].annotations, vec![Annotation::Required]);
        assert_eq!(props[0].default, json!(123));
        assert_eq!(props[0].description, "description");

        assert_eq!(props[1].description, "");
        assert_eq!(props[2].annotations, Vec::<Annotation>::new());
        assert_eq!(props[2].default, Value::Null);
    }

    #[test]
    fn test_unknown_annotation_rejected() {
        let yaml = "schema:\n  properties:\n  - property: x\n    annotations: [mandatory]\n";
        assert!(serde_yaml::from_str::<SchemaFile>(yaml).is_err());
    }

    #[test]
    fn test_missing_schema_key_is_empty() {
        let file: SchemaFile = serde_yaml::from_str("other: 1").unwrap();
        assert!(file.schema.properties.is_empty());
    }

    #[test]
    fn test_required_annotation() {
        let required = Property::new("a").with_annotation(Annotation::Required);
        let both = Property::new("b")
            .with_annotation(Annotation::Optional)
            .with_annotation(Annotation::Required);
        let deprecated = Property::new("c").with_annotation(Annotation::Deprecated);

        assert!(required.is_required());
        assert!(both.is_required());
        assert!(!deprecated.is_required());
        assert!(!Property::new("d").is_required());
    }

    #[test]
    fn test_declares_exact_names_only() {
        let schema = Schema::new(vec![Property::new("server.port")]);
        let declared = schema.declared_names();

        assert!(declared.contains("server.port"));
        assert!(!declared.contains("server"));
        assert!(!declared.contains("server.port.x"));
    }

    #[test]
    fn test_duplicate_names() {
        let schema = Schema::new(vec![
            Property::new("a"),
            Property::new("b"),
            Property::new("a"),
            Property::new("a"),
        ]);
        assert_eq!(schema.duplicate_names(), vec!["a"]);
    }
}
