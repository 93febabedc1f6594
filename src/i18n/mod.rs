//! Multilingual support for localized entities.
//!
//! - `registry`: the static locale table and text directions
//! - `locale`: request language selection
//! - `resolver`: per-attribute fallback over `A` / `A_en` / `A_ar` columns

mod locale;
mod registry;
mod resolver;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry, TextDirection};
pub use resolver::{resolve_attribute, AttributeKind, LocalizedAttribute, ResolvedView};
