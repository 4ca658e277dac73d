/// Dotted-path assignment into a JSON document, auto-creating intermediate
/// containers. A segment whose following segment is all digits creates an
/// array; otherwise an object. Existing containers are reused regardless of
/// which kind the path would have created.
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Empty key path")]
    EmptyPath,

    #[error("Invalid array index: {0}")]
    InvalidIndex(String),
}

/// Upper bound for auto-created array indices.
pub const MAX_PATH_INDEX: usize = 4096;

pub(crate) fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}

/// Assign `value` at the dot-separated `key_path` inside `target`.
///
/// With `infer_array_paths` set, an all-digit segment addresses an array
/// index and its parent container is created as an array; without it every
/// segment is an object key. A literal object field named `"0"` is therefore
/// indistinguishable from an array index when inference is on.
pub fn set_nested_value(
    target: &mut Map<String, Value>,
    key_path: &str,
    value: Value,
    infer_array_paths: bool,
) -> Result<(), PathError> {
    if key_path.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let segments: Vec<&str> = key_path.split('.').collect();
    assign_into_map(target, &segments, value, infer_array_paths)
}

fn empty_container(as_array: bool) -> Value {
    if as_array {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn parse_index(segment: &str) -> Result<usize, PathError> {
    if !is_index_segment(segment) {
        return Err(PathError::InvalidIndex(segment.to_string()));
    }
    let index: usize = segment
        .parse()
        .map_err(|_| PathError::InvalidIndex(segment.to_string()))?;
    if index > MAX_PATH_INDEX {
        return Err(PathError::InvalidIndex(segment.to_string()));
    }
    Ok(index)
}

fn ensure_slot(items: &mut Vec<Value>, index: usize) {
    if items.len() <= index {
        items.resize(index + 1, Value::Null);
    }
}

fn assign_into_map(
    map: &mut Map<String, Value>,
    segments: &[&str],
    value: Value,
    infer: bool,
) -> Result<(), PathError> {
    match segments {
        [] => Ok(()),
        [last] => {
            map.insert((*last).to_string(), value);
            Ok(())
        }
        [head, rest @ ..] => {
            let next_is_index = infer && is_index_segment(rest[0]);
            let child = map
                .entry((*head).to_string())
                .or_insert_with(|| empty_container(next_is_index));
            if !matches!(child, Value::Object(_) | Value::Array(_)) {
                *child = empty_container(next_is_index);
            }
            assign_into_value(child, rest, value, infer)
        }
    }
}

fn assign_into_value(
    node: &mut Value,
    segments: &[&str],
    value: Value,
    infer: bool,
) -> Result<(), PathError> {
    match node {
        Value::Object(map) => assign_into_map(map, segments, value, infer),
        Value::Array(items) => match segments {
            [] => Ok(()),
            [last] => {
                let index = parse_index(last)?;
                ensure_slot(items, index);
                items[index] = value;
                Ok(())
            }
            [head, rest @ ..] => {
                let index = parse_index(head)?;
                let next_is_index = infer && is_index_segment(rest[0]);
                ensure_slot(items, index);
                let child = &mut items[index];
                if !matches!(child, Value::Object(_) | Value::Array(_)) {
                    *child = empty_container(next_is_index);
                }
                assign_into_value(child, rest, value, infer)
            }
        },
        // A scalar left over from a previous write; replace it and retry.
        other => {
            *other = empty_container(false);
            assign_into_value(other, segments, value, infer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Map<String, Value> {
        Map::new()
    }

    #[test]
    fn assigns_flat_keys() {
        let mut doc = root();
        set_nested_value(&mut doc, "title", json!("Hi"), true).unwrap();
        assert_eq!(Value::Object(doc), json!({"title": "Hi"}));
    }

    #[test]
    fn creates_intermediate_objects() {
        let mut doc = root();
        set_nested_value(&mut doc, "hero.ctaPrimary.label", json!("Shop"), true).unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({"hero": {"ctaPrimary": {"label": "Shop"}}})
        );
    }

    #[test]
    fn numeric_segments_create_arrays() {
        let mut doc = root();
        set_nested_value(&mut doc, "sections.1.title", json!("B"), true).unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({"sections": [null, {"title": "B"}]})
        );
    }

    #[test]
    fn inference_off_treats_digits_as_object_keys() {
        let mut doc = root();
        set_nested_value(&mut doc, "sections.0.title", json!("A"), false).unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({"sections": {"0": {"title": "A"}}})
        );
    }

    #[test]
    fn replaces_scalar_intermediates() {
        let mut doc = root();
        set_nested_value(&mut doc, "hero", json!("legacy"), true).unwrap();
        set_nested_value(&mut doc, "hero.headline", json!("New"), true).unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({"hero": {"headline": "New"}})
        );
    }

    #[test]
    fn keeps_existing_containers() {
        let mut doc = root();
        set_nested_value(&mut doc, "meta.a", json!(1), true).unwrap();
        set_nested_value(&mut doc, "meta.b", json!(2), true).unwrap();
        assert_eq!(Value::Object(doc), json!({"meta": {"a": 1, "b": 2}}));
    }

    #[test]
    fn rejects_empty_path_and_runaway_indices() {
        let mut doc = root();
        assert!(matches!(
            set_nested_value(&mut doc, "", json!(1), true),
            Err(PathError::EmptyPath)
        ));

        let mut items = root();
        set_nested_value(&mut items, "list.0", json!(1), true).unwrap();
        let err = set_nested_value(&mut items, "list.999999999", json!(2), true);
        assert!(matches!(err, Err(PathError::InvalidIndex(_))));
    }

    #[test]
    fn non_numeric_segment_into_array_is_an_error() {
        let mut doc = root();
        set_nested_value(&mut doc, "list.0", json!("a"), true).unwrap();
        let err = set_nested_value(&mut doc, "list.first", json!("b"), true);
        assert!(matches!(err, Err(PathError::InvalidIndex(_))));
    }
}
