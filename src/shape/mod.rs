//! Response shaping: one [`ResolvedView`], several document formats.
//!
//! Handlers pick the [`Shape`] for their route and hand the view to its
//! formatter. Formatters never look at the request and never fail; the only
//! failure in this layer is an entity that was not found.

mod canonical;
mod legacy;
mod mobile;

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::i18n::ResolvedView;

pub use canonical::CanonicalFormatter;
pub use legacy::{canonical_name, legacy_name, LegacyFormatter};
pub use mobile::{MobileFormatter, MobileStructuredFormatter};

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Canonical,
    Legacy,
    Mobile,
    MobileStructured,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Canonical, Shape::Legacy, Shape::Mobile, Shape::MobileStructured];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Canonical => "canonical",
            Shape::Legacy => "legacy",
            Shape::Mobile => "mobile",
            Shape::MobileStructured => "mobile-structured",
        }
    }

    pub fn formatter(&self) -> &'static dyn ResponseFormatter {
        match self {
            Shape::Canonical => &CanonicalFormatter,
            Shape::Legacy => &LegacyFormatter,
            Shape::Mobile => &MobileFormatter,
            Shape::MobileStructured => &MobileStructuredFormatter,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Shape::ALL.iter().map(Shape::name).collect();
                format!("unknown shape '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Turns a resolved view into a response document.
pub trait ResponseFormatter: Send + Sync {
    fn shape(&self) -> Shape;

    fn format(&self, view: &ResolvedView) -> Value;
}

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

/// Shape `view`, or report the entity as missing. Every shape reports a
/// missing entity the same way.
pub fn render(
    shape: Shape,
    entity: &'static str,
    id: impl std::fmt::Display,
    view: Option<ResolvedView>,
) -> Result<Value, ShapeError> {
    match view {
        Some(view) => Ok(shape.formatter().format(&view)),
        None => Err(ShapeError::NotFound {
            entity,
            id: id.to_string(),
        }),
    }
}

/// `Some(v)` unless `v` is absent or JSON null.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Copy of `value`, or JSON null when absent.
pub(crate) fn or_null(value: Option<&Value>) -> Value {
    present(value).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Map, Value};

    use crate::database::models::{CATEGORIES, LOGOS};
    use crate::i18n::{Locale, ResolvedView};

    pub fn logo_row() -> Map<String, Value> {
        match json!({
            "id": "6f1c2d7e-0a51-4c3f-9a8e-3b2f1d0c9e88",
            "title": "Old",
            "title_en": null,
            "title_ar": "شعار",
            "description": null,
            "description_en": "A bold mark",
            "description_ar": null,
            "tags": null,
            "tags_en": ["bold", "modern"],
            "tags_ar": null,
            "category_id": "0d7f0f5e-3c2a-4e5b-8f1d-2a9b8c7d6e5f",
            "owner_id": null,
            "canvas_width": 800,
            "canvas_height": 600,
            "background_color": "#FFFFFF",
            "created_at": "2024-01-01T00:00:00+00:00",
            "updated_at": "2024-02-01T00:00:00+00:00",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    pub fn logo_view(lang: &str) -> ResolvedView {
        ResolvedView::resolve(LOGOS.entity, LOGOS.localized, &logo_row(), Locale::select(Some(lang)))
    }

    pub fn category_view(lang: &str) -> ResolvedView {
        let row = match json!({
            "id": "0d7f0f5e-3c2a-4e5b-8f1d-2a9b8c7d6e5f",
            "name": "Tech",
            "name_ar": "تقنية",
            "description_en": "Technology brands",
            "slug": "tech",
            "sort_order": 3,
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        ResolvedView::resolve(CATEGORIES.entity, CATEGORIES.localized, &row, Locale::select(Some(lang)))
    }
}
