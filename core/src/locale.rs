/// Supported locales and the fallback policy used during content resolution.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A supported storefront locale. The set is closed; anything else a caller
/// sends is treated as unsupported and resolved through the default order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pt,
    Es,
}

impl Locale {
    /// Declared order. Drives generic fallback and locale-switcher UI.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Pt, Locale::Es];

    pub const DEFAULT: Locale = Locale::En;

    /// Parse a locale code. Returns `None` for anything outside the
    /// supported set, including empty and mixed-case-with-region codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "pt" => Some(Locale::Pt),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
            Locale::Es => "es",
        }
    }

    /// Human-readable label for locale-switcher UI.
    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Pt => "Portuguese",
            Locale::Es => "Spanish",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Curated per-locale fallback order. Every entry lists all supported
/// locales exactly once.
fn curated_fallbacks(locale: Locale) -> &'static [Locale] {
    match locale {
        Locale::En => &[Locale::En, Locale::Pt, Locale::Es],
        Locale::Pt => &[Locale::Pt, Locale::En, Locale::Es],
        Locale::Es => &[Locale::Es, Locale::En, Locale::Pt],
    }
}

/// Ordered, deduplicated list of locales to try for a request,
/// most-preferred first.
///
/// A supported request uses its curated fallback table verbatim. Anything
/// else falls back to the default locale followed by the remaining declared
/// order. The result always contains every supported locale exactly once.
pub fn locale_preference(requested: &str) -> Vec<Locale> {
    if let Some(locale) = Locale::parse(requested) {
        return curated_fallbacks(locale).to_vec();
    }

    let mut result: Vec<Locale> = Vec::with_capacity(Locale::ALL.len());
    for candidate in std::iter::once(Locale::DEFAULT).chain(Locale::ALL) {
        if !result.contains(&candidate) {
            result.push(candidate);
        }
    }
    result
}

/// Records which locales actually supplied content during one resolution
/// pass, as opposed to which locale was requested.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocaleUsage {
    used: HashSet<Locale>,
}

impl LocaleUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, locale: Locale) {
        self.used.insert(locale);
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.used.contains(&locale)
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn merge(&mut self, other: &LocaleUsage) {
        self.used.extend(other.used.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = Locale> + '_ {
        self.used.iter().copied()
    }
}

/// Decide the single locale a resolved document should report.
///
/// This is not simply the requested locale: when the request had no content
/// and a fallback supplied it, the fallback is the locale the reader will
/// actually see, and the locale switcher must highlight it.
pub fn resolved_locale(usage: &LocaleUsage, requested: &str) -> Locale {
    let preference = locale_preference(requested);
    if !usage.is_empty() {
        if let Some(found) = preference.iter().copied().find(|l| usage.contains(*l)) {
            return found;
        }
    }
    preference.first().copied().unwrap_or(Locale::DEFAULT)
}

static PATH_LOCALE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(en|pt|es)/").expect("valid locale path regex"));

/// Extract a locale from a content file path such as
/// `/content/pages/pt/contact.md`.
pub fn locale_from_path(path: &str) -> Option<Locale> {
    PATH_LOCALE_REGEX
        .captures(path)
        .and_then(|captures| captures.get(1))
        .and_then(|matched| Locale::parse(matched.as_str()))
}

/// Rewrite a base content path to its per-locale variant. The default locale
/// maps to the base path itself; other locales are inserted before the file
/// extension (`index.md` -> `index.pt.md`), or appended when there is none.
pub fn localized_content_path(base_path: &str, locale: Locale) -> String {
    if locale == Locale::DEFAULT {
        return base_path.to_string();
    }

    match base_path.rfind('.') {
        None => format!("{}.{}", base_path, locale.code()),
        Some(dot) => format!(
            "{}.{}{}",
            &base_path[..dot],
            locale.code(),
            &base_path[dot..]
        ),
    }
}
