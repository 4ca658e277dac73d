pub mod assembler;
pub mod cache;
pub mod config;
pub mod hero;
pub mod locale;
pub mod overlay;
pub mod paths;
pub mod resolver;
pub mod schedule;
pub mod sections;
pub mod value;


pub use assembler::{DocumentAssembler, ResolvedDocument};
pub use cache::PreviewCache;
pub use config::{ConfigError, EngineConfig, ResolverOptions};
pub use hero::HeroResolver;
pub use locale::{
    locale_from_path, locale_preference, localized_content_path, resolved_locale, Locale,
    LocaleUsage,
};
pub use overlay::{
    CardWidth, OverlayBackground, OverlayDefaults, OverlayPlacement, OverlayTheme, TextAlign,
    VerticalAlign, GRID_SIZE,
};
pub use paths::{set_nested_value, PathError, MAX_PATH_INDEX};
pub use resolver::resolve_value;
pub use schedule::RefreshScheduler;
pub use sections::{
    FieldListResolver, MetadataResolver, PassthroughResolver, ResolveContext, SectionListResolver,
    SubtreeResolver, RESERVED_TOP_LEVEL_KEYS,
};
pub use value::{
    classify, coerce_option_value, is_locale_map, normalize_candidate, repair_numeric_key_objects,
    NodeKind,
};
