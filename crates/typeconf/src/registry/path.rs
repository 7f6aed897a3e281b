//! Dotted path parsing and tree navigation.

use serde_json::{Map, Value};

/// Separator between path segments.
pub(crate) const SEPARATOR: char = '.';

/// Split a dotted path into branches; the empty path is the root.
///
/// Returns `None` when a non-empty path has an empty segment.
pub(crate) fn split(path: &str) -> Option<Vec<String>> {
    if path.is_empty() {
        return Some(Vec::new());
    }
    let branches: Vec<String> = path.split(SEPARATOR).map(str::to_string).collect();
    if branches.iter().any(String::is_empty) {
        return None;
    }
    Some(branches)
}

/// Whether one branch list is a prefix of the other (equal lists included).
pub(crate) fn overlaps(left: &[String], right: &[String]) -> bool {
    left.iter().zip(right).all(|(a, b)| a == b)
}

/// Follow branches through nested objects. `null` counts as absent.
pub(crate) fn navigate<'a, S: AsRef<str>>(root: &'a Value, branches: &[S]) -> Option<&'a Value> {
    let mut node = root;
    for branch in branches {
        node = node.as_object()?.get(branch.as_ref())?;
    }
    (!node.is_null()).then_some(node)
}

/// Write a value at the branches, creating (or replacing non-object)
/// intermediates along the way.
pub(crate) fn assign(root: &mut Value, branches: &[String], value: Value) {
    let Some((last, parents)) = branches.split_last() else {
        *root = value;
        return;
    };
    let mut node = root;
    for branch in parents {
        node = object_mut(node)
            .entry(branch.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    object_mut(node).insert(last.clone(), value);
}

fn object_mut(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}
