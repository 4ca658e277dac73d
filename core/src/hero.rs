/// Hero sub-tree resolution and field promotion.
///
/// The hero block has accumulated several authoring shapes over time: a
/// nested `content`/`ctas`/`layout` group, legacy flat siblings, and a
/// `heroAlignment`-style alignment group. After resolving the block as a
/// unit, the well-known fields are promoted into flattened top-level keys
/// so renderers read one shape. Nested groups win over legacy siblings.
use log::warn;
use serde_json::{Map, Value};

use crate::locale::LocaleUsage;
use crate::paths::set_nested_value;
use crate::resolver::resolve_value;
use crate::sections::{ResolveContext, SubtreeResolver};

const ALIGNMENT_KEYS: [(&str, &str); 6] = [
    ("alignX", "heroAlignX"),
    ("alignY", "heroAlignY"),
    ("textPosition", "heroTextPosition"),
    ("textAnchor", "heroTextAnchor"),
    ("overlay", "heroOverlay"),
    ("layoutHint", "heroLayoutHint"),
];

pub struct HeroResolver;

impl SubtreeResolver for HeroResolver {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn apply(
        &self,
        entry: &Map<String, Value>,
        ctx: &ResolveContext<'_>,
        doc: &mut Map<String, Value>,
        usage: &mut LocaleUsage,
    ) {
        let Some(raw) = entry.get("hero") else {
            return;
        };
        let Some(resolved) = resolve_value(raw, ctx.requested, usage) else {
            return;
        };

        if let Value::Object(hero) = &resolved {
            promote_text(hero, doc, "headline", "heroHeadline");
            promote_text(hero, doc, "subheadline", "heroSubheadline");
            promote_cta(hero, doc, ctx, "primary", "primaryCta", "ctaPrimary");
            promote_cta(hero, doc, ctx, "secondary", "secondaryCta", "ctaSecondary");
            promote_alignment(hero, doc, ctx);
        }

        doc.insert("hero".to_string(), resolved);
    }
}

fn object<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match map.get(key) {
        Some(Value::Object(nested)) => Some(nested),
        _ => None,
    }
}

fn promote_text(hero: &Map<String, Value>, doc: &mut Map<String, Value>, key: &str, dest: &str) {
    let source = object(hero, "content")
        .and_then(|content| content.get(key))
        .or_else(|| hero.get(key));
    if let Some(value) = source {
        doc.insert(dest.to_string(), value.clone());
    }
}

/// CTA precedence: `ctas.primary` before `content.primaryCta` before the
/// legacy flat `ctaPrimary` sibling. Structured CTAs contribute `label` and
/// `href`; a legacy bare string is just a label.
fn promote_cta(
    hero: &Map<String, Value>,
    doc: &mut Map<String, Value>,
    ctx: &ResolveContext<'_>,
    ctas_key: &str,
    content_key: &str,
    legacy_key: &str,
) {
    let source = object(hero, "ctas")
        .and_then(|ctas| ctas.get(ctas_key))
        .or_else(|| object(hero, "content").and_then(|content| content.get(content_key)))
        .or_else(|| hero.get(legacy_key));
    let Some(source) = source else {
        return;
    };

    let dest = format!("heroCtas.{legacy_key}");
    match source {
        Value::Object(cta) => {
            if let Some(label) = cta.get("label") {
                assign(doc, ctx, &format!("{dest}.label"), label.clone());
            }
            if let Some(href) = cta.get("href").or_else(|| cta.get("url")) {
                assign(doc, ctx, &format!("{dest}.href"), href.clone());
            }
        }
        other => assign(doc, ctx, &format!("{dest}.label"), other.clone()),
    }
}

fn promote_alignment(
    hero: &Map<String, Value>,
    doc: &mut Map<String, Value>,
    ctx: &ResolveContext<'_>,
) {
    for (source_key, dest_key) in ALIGNMENT_KEYS {
        let value = object(hero, "layout")
            .and_then(|layout| layout.get(source_key))
            .or_else(|| hero.get(source_key))
            .or_else(|| object(hero, "alignment").and_then(|group| group.get(dest_key)));
        if let Some(value) = value {
            assign(doc, ctx, &format!("heroAlignment.{dest_key}"), value.clone());
        }
    }
}

fn assign(doc: &mut Map<String, Value>, ctx: &ResolveContext<'_>, path: &str, value: Value) {
    if let Err(error) = set_nested_value(doc, path, value, ctx.options.infer_array_paths) {
        warn!("hero promotion skipped {:?}: {}", path, error);
    }
}
