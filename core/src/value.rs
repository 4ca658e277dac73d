/// Structural classification and "has content" checks for raw CMS values.
///
/// Detection is purely structural: an object is a locale map iff it is
/// non-empty and every key is a supported locale code. Everything else is an
/// ordinary object whose keys are resolved individually.
use serde_json::{Map, Number, Value};

use crate::locale::Locale;
use crate::paths::is_index_segment;

/// Discriminant computed once per node so recursive resolution is a match
/// rather than ad hoc type probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Scalar,
    Array,
    Object,
    LocaleMap,
}

pub fn is_locale_map(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|key| Locale::parse(key).is_some())
}

pub fn classify(value: &Value) -> NodeKind {
    match value {
        Value::Null => NodeKind::Null,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
        Value::Array(_) => NodeKind::Array,
        Value::Object(map) => {
            if is_locale_map(map) {
                NodeKind::LocaleMap
            } else {
                NodeKind::Object
            }
        }
    }
}

/// Shallow "has content" check for a locale-map candidate.
///
/// Strings are trimmed; empty strings, empty arrays, and empty objects are
/// not usable. The check is deliberately shallow: an array of empty strings
/// passes here, and deeper emptiness is handled when the resolver descends.
pub fn normalize_candidate(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        Value::Number(_) | Value::Bool(_) => Some(value.clone()),
        Value::Array(items) => {
            if items.is_empty() {
                None
            } else {
                Some(value.clone())
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                None
            } else {
                Some(value.clone())
            }
        }
    }
}

/// Coerce an option-style string into its typed form: `"true"`/`"false"`
/// become booleans, numeric strings become numbers, everything else is
/// trimmed and kept as a string. Non-strings pass through unchanged.
pub fn coerce_option_value(value: &Value) -> Value {
    let Value::String(raw) = value else {
        return value.clone();
    };

    let trimmed = raw.trim();
    if trimmed == "true" {
        return Value::Bool(true);
    }
    if trimmed == "false" {
        return Value::Bool(false);
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(Number::from(integer));
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(trimmed.to_string())
}

/// Repair objects whose keys are all numeric (`{"0": …, "1": …}`) into
/// arrays, recursively. CMS round-trips of dotted-path writes produce these.
/// Locale maps are left untouched.
pub fn repair_numeric_key_objects(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(repair_numeric_key_objects).collect())
        }
        Value::Object(map) => {
            if is_locale_map(&map) {
                return Value::Object(map);
            }
            if !map.is_empty() && map.keys().all(|key| is_index_segment(key)) {
                let mut entries: Vec<(usize, Value)> = map
                    .into_iter()
                    .filter_map(|(key, nested)| {
                        key.parse::<usize>()
                            .ok()
                            .map(|index| (index, repair_numeric_key_objects(nested)))
                    })
                    .collect();
                entries.sort_by_key(|(index, _)| *index);
                return Value::Array(entries.into_iter().map(|(_, nested)| nested).collect());
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, nested)| (key, repair_numeric_key_objects(nested)))
                    .collect(),
            )
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_locale_maps_structurally() {
        let map = json!({"en": "Hello", "pt": "Olá"});
        assert_eq!(classify(&map), NodeKind::LocaleMap);

        let mixed = json!({"en": "Hello", "title": "x"});
        assert_eq!(classify(&mixed), NodeKind::Object);

        let empty = json!({});
        assert_eq!(classify(&empty), NodeKind::Object);
    }

    #[test]
    fn classifies_scalars_arrays_null() {
        assert_eq!(classify(&json!(null)), NodeKind::Null);
        assert_eq!(classify(&json!(1)), NodeKind::Scalar);
        assert_eq!(classify(&json!(true)), NodeKind::Scalar);
        assert_eq!(classify(&json!("x")), NodeKind::Scalar);
        assert_eq!(classify(&json!([1, 2])), NodeKind::Array);
    }

    #[test]
    fn normalize_rejects_empty_content() {
        assert_eq!(normalize_candidate(&json!(null)), None);
        assert_eq!(normalize_candidate(&json!("")), None);
        assert_eq!(normalize_candidate(&json!("   ")), None);
        assert_eq!(normalize_candidate(&json!([])), None);
        assert_eq!(normalize_candidate(&json!({})), None);
    }

    #[test]
    fn normalize_trims_strings_and_keeps_scalars() {
        assert_eq!(
            normalize_candidate(&json!("  Olá  ")),
            Some(json!("Olá"))
        );
        assert_eq!(normalize_candidate(&json!(0)), Some(json!(0)));
        assert_eq!(normalize_candidate(&json!(false)), Some(json!(false)));
    }

    #[test]
    fn normalize_is_shallow_for_containers() {
        // An array of empty strings is usable at this layer.
        assert_eq!(
            normalize_candidate(&json!(["", ""])),
            Some(json!(["", ""]))
        );
        assert_eq!(
            normalize_candidate(&json!({"a": ""})),
            Some(json!({"a": ""}))
        );
    }

    #[test]
    fn coerces_option_strings() {
        assert_eq!(coerce_option_value(&json!(" true ")), json!(true));
        assert_eq!(coerce_option_value(&json!("false")), json!(false));
        assert_eq!(coerce_option_value(&json!("42")), json!(42));
        assert_eq!(coerce_option_value(&json!("2.5")), json!(2.5));
        assert_eq!(coerce_option_value(&json!(" strong ")), json!("strong"));
        assert_eq!(coerce_option_value(&json!(7)), json!(7));
    }

    #[test]
    fn repairs_numeric_key_objects_into_arrays() {
        let raw = json!({"items": {"0": {"title": "a"}, "1": {"title": "b"}}});
        let repaired = repair_numeric_key_objects(raw);
        assert_eq!(
            repaired,
            json!({"items": [{"title": "a"}, {"title": "b"}]})
        );
    }

    #[test]
    fn repair_leaves_locale_maps_alone() {
        let raw = json!({"en": "Hello", "pt": "Olá"});
        assert_eq!(repair_numeric_key_objects(raw.clone()), raw);
    }
}
