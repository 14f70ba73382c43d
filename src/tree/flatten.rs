//! Flattening of nested documents into dotted-path leaf entries.

use super::join_path;
use serde_json::Value;
use std::collections::BTreeMap;

/// Dotted path to leaf value, borrowed from the flattened document.
pub type FlatMap<'a> = BTreeMap<String, &'a Value>;

/// Flatten `node` into one entry per leaf, with paths rooted at `prefix`.
///
/// - Mappings are descended into and never reported themselves
/// - Null is a leaf like any scalar
/// - Sequences are single leaves; their elements get no paths of their own
/// - A mapping with no keys contributes nothing
///
/// A non-mapping `node` has no keys to walk and flattens to an empty map.
///
/// # Example
/// ```
/// use serde_json::json;
/// use opconf_validator::tree::flatten;
///
/// let doc = json!({"a": {"b": 1, "c": null}, "d": [1, 2]});
/// let flat = flatten(&doc, "");
/// assert_eq!(flat.keys().collect::<Vec<_>>(), ["a.b", "a.c", "d"]);
/// ```
pub fn flatten<'a>(node: &'a Value, prefix: &str) -> FlatMap<'a> {
    let mut entries = FlatMap::new();
    collect(node, prefix, &mut entries);
    entries
}

fn collect<'a>(node: &'a Value, prefix: &str, entries: &mut FlatMap<'a>) {
    let Value::Object(map) = node else {
        return;
    };
    for (key, child) in map {
        let path = join_path(prefix, key);
        match child {
            Value::Object(_) => collect(child, &path, entries),
            leaf => {
                // A literal "a.b" key and a nested a: {b: ..} share a path;
                // whichever is visited last wins.
                entries.insert(path, leaf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn walker_doc() -> Value {
        json!({
            "a1": {
                "b1": {"c1": 1, "c2": 2, "c3": null},
                "b2": null,
                "b3": ["1", "2"]
            },
            "a2": null
        })
    }

    #[test]
    fn test_flatten_reports_every_leaf() {
        let doc = walker_doc();
        let flat = flatten(&doc, "");

        assert_eq!(flat.len(), 6);
        assert_eq!(flat["a1.b1.c1"], &json!(1));
        assert_eq!(flat["a1.b1.c2"], &json!(2));
        assert_eq!(flat["a1.b3"], &json!(["1", "2"]));
    }

    #[test]
    fn test_null_leaves_are_kept() {
        let doc = walker_doc();
        let flat = flatten(&doc, "");

        for path in ["a2", "a1.b2", "a1.b1.c3"] {
            assert_eq!(flat.get(path), Some(&&Value::Null), "missing {}", path);
        }
    }

    #[test]
    fn test_internal_nodes_are_not_keys() {
        let doc = walker_doc();
        let flat = flatten(&doc, "");

        assert!(!flat.contains_key("a1"));
        assert!(!flat.contains_key("a1.b1"));
    }

    #[test]
    fn test_top_level_scalars_flatten_to_themselves() {
        let doc = json!({"name": "svc", "port": 8080, "debug": false});
        let flat = flatten(&doc, "");

        let expected = doc.as_object().unwrap();
        assert_eq!(flat.len(), expected.len());
        for (key, value) in expected {
            assert_eq!(flat[key], value);
        }
    }

    #[test]
    fn test_sequences_are_not_expanded() {
        let doc = json!({"hosts": [{"name": "a"}, {"name": "b"}]});
        let flat = flatten(&doc, "");

        assert_eq!(flat.len(), 1);
        assert_eq!(flat["hosts"], &json!([{"name": "a"}, {"name": "b"}]));
    }

    #[test]
    fn test_prefix_is_prepended() {
        let doc = json!({"port": 1, "tls": {"enabled": true}});
        let flat = flatten(&doc, "server");

        assert_eq!(
            flat.keys().collect::<Vec<_>>(),
            ["server.port", "server.tls.enabled"]
        );
    }

    #[test]
    fn test_empty_mapping_contributes_nothing() {
        let doc = json!({"empty": {}, "x": 1});
        let flat = flatten(&doc, "");

        assert_eq!(flat.keys().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn test_non_mapping_root_is_empty() {
        assert!(flatten(&json!("scalar"), "").is_empty());
        assert!(flatten(&json!(null), "").is_empty());
    }
}
