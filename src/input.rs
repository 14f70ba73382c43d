//! Reading schema and configuration files from disk.
//!
//! Both file kinds are YAML. Configuration documents are deserialized
//! straight into [`Document`] trees; any read or parse failure is fatal.

use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaFile};
use crate::tree::{Document, kind_of};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read and parse a schema file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = read(path)?;
    let schema = parse_schema(&content, path)?;
    debug!(path = %path.display(), properties = schema.properties.len(), "Loaded schema");
    Ok(schema)
}

/// Parse schema YAML; `path` is only used in error messages.
pub fn parse_schema(content: &str, path: &Path) -> Result<Schema> {
    if is_blank(content) {
        return Ok(Schema::default());
    }
    let file: SchemaFile = serde_yaml::from_str(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.schema)
}

/// Read and parse one configuration document.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = read(path)?;
    let document = parse_document(&content, path)?;
    debug!(path = %path.display(), "Loaded configuration document");
    Ok(document)
}

/// Parse configuration YAML into a mapping-rooted document.
///
/// Only the first YAML document of the stream is read. Merge keys
/// (`<<: *anchor`) are applied before conversion. An empty document becomes
/// an empty mapping; any other non-mapping root is rejected.
pub fn parse_document(content: &str, path: &Path) -> Result<Document> {
    if is_blank(content) {
        return Ok(Value::Object(Map::new()));
    }
    let parse_error = |source: serde_yaml::Error| Error::Parse {
        path: path.to_path_buf(),
        source,
    };
    let Some(first) = serde_yaml::Deserializer::from_str(content).next() else {
        return Ok(Value::Object(Map::new()));
    };
    let mut yaml = serde_yaml::Value::deserialize(first).map_err(parse_error)?;
    yaml.apply_merge().map_err(parse_error)?;
    let value: Value = serde_yaml::from_value(yaml).map_err(parse_error)?;

    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Map::new())),
        other => Err(Error::NotAMapping {
            path: path.to_path_buf(),
            kind: kind_of(&other),
        }),
    }
}

/// Load every configuration document, in the given order.
///
/// Stops at the first failure; nothing is returned for the others.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Document>> {
    paths.iter().map(|p| load_document(p.as_ref())).collect()
}

/// Whether the YAML holds nothing but whitespace and comments.
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: PathBuf::from(path),
        source,
    })
}
