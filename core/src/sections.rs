/// Per-subtree resolvers for the well-known parts of a content entry.
///
/// Each resolver handles one independent sub-tree (metadata, fields,
/// sections, remaining top-level keys) and is composed by the document
/// assembler via ordered merge. The hero resolver lives in its own module.
use log::warn;
use serde_json::{Map, Value};

use crate::config::ResolverOptions;
use crate::locale::LocaleUsage;
use crate::paths::set_nested_value;
use crate::resolver::resolve_value;
use crate::value::{coerce_option_value, repair_numeric_key_objects};

/// Top-level keys with dedicated merge treatment; the passthrough resolver
/// skips these.
pub const RESERVED_TOP_LEVEL_KEYS: [&str; 4] = ["metadata", "hero", "fields", "sections"];

pub struct ResolveContext<'a> {
    pub requested: &'a str,
    pub options: &'a ResolverOptions,
}

/// One independent sub-tree of a content entry. Implementations read from
/// the raw entry and merge their partial output into the resolved document,
/// recording locale usage in their own accumulator.
pub trait SubtreeResolver {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    );
}

/// `metadata.title` / `metadata.description` become the flattened
/// `metaTitle` / `metaDescription` keys.
pub struct MetadataResolver;

impl SubtreeResolver for MetadataResolver {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    ) {
        let Some(Value::Object(metadata)) = entry.get("metadata") else {
            return;
        };

        for (source_key, dest_key) in [("title", "metaTitle"), ("description", "metaDescription")] {
            if let Some(resolved) = metadata
                .get(source_key)
                .and_then(|raw| resolve_value(raw, ctx.requested, usage))
            {
                doc.insert(dest_key.to_string(), resolved);
            }
        }
    }
}

/// The generic escape hatch: a flat list of `{key, value, visible}` records
/// assigned into the document at the dotted path given by `key`. Records
/// marked `kind: "option"` get their string values coerced into
/// booleans/numbers, matching how the CMS stores toggle and slider fields.
pub struct FieldListResolver;

impl SubtreeResolver for FieldListResolver {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    ) {
        let Some(Value::Array(records)) = entry.get("fields") else {
            return;
        };

        for record in records {
            let Value::Object(record) = record else {
                continue;
            };
            let Some(Value::String(key)) = record.get("key") else {
                continue;
            };
            if matches!(record.get("visible"), Some(Value::Bool(false))) {
                continue;
            }
            let Some(raw) = record.get("value") else {
                continue;
            };
            let Some(mut resolved) = resolve_value(raw, ctx.requested, usage) else {
                continue;
            };
            if matches!(record.get("kind"), Some(Value::String(kind)) if kind == "option") {
                resolved = coerce_option_value(&resolved);
            }
            if let Err(error) = set_nested_value(doc, key, resolved, ctx.options.infer_array_paths)
            {
                warn!("skipping field {:?}: {}", key, error);
            }
        }
    }
}

/// Ordered, heterogeneous typed blocks. The literal `type` string is kept
/// untouched; a section without one cannot be rendered and is dropped, as
/// is any section whose resolved `visible` is explicitly `false`. Array
/// order is render order and is preserved.
pub struct SectionListResolver;

impl SubtreeResolver for SectionListResolver {
    fn name(&self) -> &'static str {
        "sections"
    }

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    ) {
        let Some(Value::Array(raw_sections)) = entry.get("sections") else {
            return;
        };

        let mut resolved_sections = Vec::with_capacity(raw_sections.len());
        for raw in raw_sections {
            let Value::Object(section) = raw else {
                continue;
            };
            let Some(Value::String(kind)) = section.get("type") else {
                continue;
            };
            if kind.trim().is_empty() {
                continue;
            }

            let mut resolved = Map::new();
            resolved.insert("type".to_string(), Value::String(kind.clone()));
            for (key, nested) in section {
                if key == "type" {
                    continue;
                }
                if let Some(flattened) = resolve_value(nested, ctx.requested, usage) {
                    resolved.insert(key.clone(), flattened);
                }
            }
            if matches!(resolved.get("visible"), Some(Value::Bool(false))) {
                continue;
            }

            let mut section = Value::Object(resolved);
            if ctx.options.repair_numeric_keys {
                section = repair_numeric_key_objects(section);
            }
            resolved_sections.push(section);
        }

        doc.insert("sections".to_string(), Value::Array(resolved_sections));
    }
}

/// Every other top-level key is resolved generically and copied through
/// when defined.
pub struct PassthroughResolver;

impl SubtreeResolver for PassthroughResolver {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    ) {
        for (key, nested) in entry {
            if RESERVED_TOP_LEVEL_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let Some(resolved) = resolve_value(nested, ctx.requested, usage) {
                doc.insert(key.clone(), resolved);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use serde_json::json;

    fn apply(resolver: &dyn SubtreeResolver, entry: Value, requested: &str) -> (Value, LocaleUsage) {
        let options = ResolverOptions::default();
        let ctx = ResolveContext {
            requested,
            options: &options,
        };
        let mut doc = Map::new();
        let mut usage = LocaleUsage::new();
        let Value::Object(entry) = entry else {
            panic!("entry fixture must be an object");
        };
        resolver.apply(&entry, &ctx, &mut doc, &mut usage);
        (Value::Object(doc), usage)
    }

    #[test]
    fn metadata_maps_to_flattened_keys() {
        let entry = json!({
            "metadata": {
                "title": {"en": "Home", "pt": "Início"},
                "description": {"en": ""}
            }
        });
        let (doc, usage) = apply(&MetadataResolver, entry, "pt");
        assert_eq!(doc, json!({"metaTitle": "Início"}));
        assert!(usage.contains(Locale::Pt));
    }

    #[test]
    fn fields_assign_at_dotted_paths() {
        let entry = json!({
            "fields": [
                {"key": "hero.ctaPrimary.label", "value": {"en": "Shop", "es": "Comprar"}},
                {"key": "hidden", "value": "x", "visible": false},
                {"key": "", "value": "dropped"}
            ]
        });
        let (doc, _) = apply(&FieldListResolver, entry, "es");
        assert_eq!(
            doc,
            json!({"hero": {"ctaPrimary": {"label": "Comprar"}}})
        );
    }

    #[test]
    fn option_fields_are_coerced() {
        let entry = json!({
            "fields": [
                {"key": "showBadge", "value": {"en": "true"}, "kind": "option"},
                {"key": "columns", "value": "3", "kind": "option"},
                {"key": "plainText", "value": "3"}
            ]
        });
        let (doc, _) = apply(&FieldListResolver, entry, "en");
        assert_eq!(
            doc,
            json!({"showBadge": true, "columns": 3, "plainText": "3"})
        );
    }

    #[test]
    fn sections_drop_hidden_and_untyped_blocks() {
        let entry = json!({
            "sections": [
                {"type": "faq", "visible": false, "items": ["a"]},
                {"type": "banner", "text": "Hi"},
                {"title": "no type"},
                {"type": "  ", "text": "blank type"}
            ]
        });
        let (doc, _) = apply(&SectionListResolver, entry, "en");
        assert_eq!(
            doc,
            json!({"sections": [{"type": "banner", "text": "Hi"}]})
        );
    }

    #[test]
    fn sections_preserve_order_and_localize_fields() {
        let entry = json!({
            "sections": [
                {"type": "mediaCopy", "title": {"en": "One", "pt": "Um"}},
                {"type": "banner", "text": {"pt": "Dois"}}
            ]
        });
        let (doc, usage) = apply(&SectionListResolver, entry, "pt");
        assert_eq!(
            doc,
            json!({"sections": [
                {"type": "mediaCopy", "title": "Um"},
                {"type": "banner", "text": "Dois"}
            ]})
        );
        assert!(usage.contains(Locale::Pt));
    }

    #[test]
    fn sections_repair_numeric_key_objects() {
        let entry = json!({
            "sections": [
                {"type": "bullets", "items": {"0": "first", "1": "second"}}
            ]
        });
        let (doc, _) = apply(&SectionListResolver, entry, "en");
        assert_eq!(
            doc,
            json!({"sections": [{"type": "bullets", "items": ["first", "second"]}]})
        );
    }

    #[test]
    fn passthrough_skips_reserved_keys() {
        let entry = json!({
            "metadata": {"title": "skip"},
            "sections": [],
            "slug": "  home  ",
            "badge": {"en": "New", "es": "Nuevo"}
        });
        let (doc, _) = apply(&PassthroughResolver, entry, "es");
        assert_eq!(doc, json!({"slug": "home", "badge": "Nuevo"}));
    }
}
