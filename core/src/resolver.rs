/// Recursive value resolution: flattens locale maps anywhere in a CMS value
/// for a requested locale, recording which locales actually supplied
/// content. Malformed input degrades to `None`; this path never errors.
use serde_json::{Map, Value};

use crate::locale::{locale_preference, LocaleUsage};
use crate::value::{classify, normalize_candidate, NodeKind};

/// Resolve an arbitrary CMS-authored value for the requested locale.
///
/// Rules, in order: null is absent; arrays keep their defined elements (an
/// empty array is still defined); locale maps pick the first usable
/// candidate per the locale preference order, record the winning locale,
/// and recurse into the chosen value; ordinary objects resolve per key and
/// collapse to `None` when no key survives; strings are trimmed and empty
/// strings are absent; numbers and booleans pass through.
pub fn resolve_value(value: &Value, requested: &str, usage: &mut LocaleUsage) -> Option<Value> {
    match classify(value) {
        NodeKind::Null => None,
        NodeKind::Array => {
            let Value::Array(items) = value else {
                return None;
            };
            let resolved: Vec<Value> = items
                .iter()
                .filter_map(|item| resolve_value(item, requested, usage))
                .collect();
            Some(Value::Array(resolved))
        }
        NodeKind::LocaleMap => {
            let Value::Object(map) = value else {
                return None;
            };
            resolve_locale_map(map, requested, usage)
        }
        NodeKind::Object => {
            let Value::Object(map) = value else {
                return None;
            };
            let mut resolved = Map::new();
            for (key, nested) in map {
                if let Some(flattened) = resolve_value(nested, requested, usage) {
                    resolved.insert(key.clone(), flattened);
                }
            }
            // Empty objects are not meaningful content, unlike empty arrays.
            if resolved.is_empty() {
                None
            } else {
                Some(Value::Object(resolved))
            }
        }
        NodeKind::Scalar => match value {
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Value::String(trimmed.to_string()))
                }
            }
            other => Some(other.clone()),
        },
    }
}

fn resolve_locale_map(
    map: &Map<String, Value>,
    requested: &str,
    usage: &mut LocaleUsage,
) -> Option<Value> {
    for locale in locale_preference(requested) {
        let Some(candidate) = map.get(locale.code()) else {
            continue;
        };
        if let Some(normalized) = normalize_candidate(candidate) {
            usage.record(locale);
            // The chosen value may itself contain locale maps, arrays, or
            // further localized objects.
            return resolve_value(&normalized, requested, usage);
        }
    }
    None
}
