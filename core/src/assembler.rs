/// Assembles a full resolved document from a raw CMS entry by running the
/// ordered pipeline of sub-tree resolvers and deciding the document-level
/// resolved locale from their combined usage.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ResolverOptions;
use crate::hero::HeroResolver;
use crate::locale::{resolved_locale, Locale, LocaleUsage};
use crate::sections::{
    FieldListResolver, MetadataResolver, PassthroughResolver, ResolveContext, SectionListResolver,
    SubtreeResolver,
};

/// A flattened, locale-free document ready for rendering, plus the locale
/// that best describes where its content came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDocument {
    #[serde(flatten)]
    pub data: Map<String, Value>,
    pub resolved_locale: Locale,
}

type LocaleObserver = Box<dyn FnMut(Locale)>;

pub struct DocumentAssembler {
    resolvers: Vec<Box<dyn SubtreeResolver>>,
    options: ResolverOptions,
    last_locale: Option<Locale>,
    observer: Option<LocaleObserver>,
}

impl DocumentAssembler {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            resolvers: vec![
                Box::new(MetadataResolver),
                Box::new(HeroResolver),
                Box::new(FieldListResolver),
                Box::new(SectionListResolver),
                Box::new(PassthroughResolver),
            ],
            options,
            last_locale: None,
            observer: None,
        }
    }

    /// Register a callback fired whenever the resolved locale changes
    /// between consecutive documents, including the first one.
    pub fn with_observer(mut self, observer: impl FnMut(Locale) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve one raw entry into a flattened document. A non-object entry
    /// yields an empty document in the requested locale's preference head.
    pub fn resolve_entry(&mut self, entry: &Value, requested: &str) -> ResolvedDocument {
        let empty = Map::new();
        let entry = match entry {
            Value::Object(map) => map,
            _ => &empty,
        };

        let ctx = ResolveContext {
            requested,
            options: &self.options,
        };
        let mut doc = Map::new();
        let mut combined = LocaleUsage::new();

        for resolver in &self.resolvers {
            let mut usage = LocaleUsage::new();
            resolver.apply(entry, &ctx, &mut doc, &mut usage);
            log::debug!(
                "resolver {} contributed locales {:?}",
                resolver.name(),
                usage.iter().collect::<Vec<_>>()
            );
            combined.merge(&usage);
        }

        let locale = resolved_locale(&combined, requested);
        if self.last_locale != Some(locale) {
            self.last_locale = Some(locale);
            if let Some(observer) = self.observer.as_mut() {
                observer(locale);
            }
        }

        ResolvedDocument {
            data: doc,
            resolved_locale: locale,
        }
    }
}
