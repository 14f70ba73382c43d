//! Dotted-path lookup in a nested document.

use super::{PATH_SEPARATOR, kind_of};
use crate::error::ResolveError;
use serde_json::Value;

/// Look up `path` in `document` without flattening it.
///
/// Returns `Ok(Some(value))` when every segment is present. The value may be
/// null or a whole mapping when the path ends on an internal node.
/// Returns `Ok(None)` as soon as a segment is absent, and treats a null
/// intermediate node (an empty YAML section) the same way.
///
/// Fails with [`ResolveError::NotAMapping`] when the path continues past a
/// scalar or sequence.
///
/// # Example
/// ```
/// use serde_json::json;
/// use opconf_validator::tree::resolve;
///
/// let doc = json!({"server": {"port": 8080}});
/// assert_eq!(resolve(&doc, "server.port"), Ok(Some(&json!(8080))));
/// assert_eq!(resolve(&doc, "server.host"), Ok(None));
/// assert!(resolve(&doc, "server.port.number").is_err());
/// ```
pub fn resolve<'a>(document: &'a Value, path: &str) -> Result<Option<&'a Value>, ResolveError> {
    descend(document, path, path)
}

fn descend<'a>(
    node: &'a Value,
    path: &str,
    rest: &str,
) -> Result<Option<&'a Value>, ResolveError> {
    let Value::Object(map) = node else {
        return Ok(None);
    };
    let (head, tail) = match rest.split_once(PATH_SEPARATOR) {
        Some((head, tail)) => (head, Some(tail)),
        None => (rest, None),
    };
    let Some(child) = map.get(head) else {
        return Ok(None);
    };

    match (tail, child) {
        (None, value) => Ok(Some(value)),
        (Some(tail), Value::Object(_)) => descend(child, path, tail),
        (Some(_), Value::Null) => Ok(None),
        (Some(tail), other) => Err(ResolveError::NotAMapping {
            path: path.to_string(),
            segment: path[..path.len() - tail.len() - 1].to_string(),
            kind: kind_of(other),
        }),
    }
}
