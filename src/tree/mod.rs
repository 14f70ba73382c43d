//! Configuration document trees.
//!
//! A document is the parsed form of one YAML file. Mappings are internal
//! nodes; null, scalars and sequences are leaves. Paths into a document are
//! dotted strings (`server.http.port`), one segment per mapping level. There
//! is no escaping, so a key containing `.` cannot be addressed.

mod flatten;
mod resolve;

pub use flatten::{FlatMap, flatten};
pub use resolve::resolve;

use serde_json::Value;

/// A parsed configuration document.
pub type Document = Value;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Join a key onto a prefix, returning the bare key for an empty prefix.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, PATH_SEPARATOR, key)
    }
}

/// Short name of a node's shape, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
