use serde_json::{json, Map, Value};

use super::{ResponseFormatter, Shape};
use crate::i18n::ResolvedView;

/// (canonical, legacy) field names for logos, as earlier clients expect them.
const LOGO_NAMES: &[(&str, &str)] = &[
    ("title", "logoName"),
    ("description", "logoDescription"),
    ("tags", "keywords"),
    ("id", "_id"),
    ("category_id", "categoryId"),
    ("owner_id", "userId"),
    ("template_id", "templateId"),
    ("canvas_width", "width"),
    ("canvas_height", "height"),
    ("background_color", "bgColor"),
    ("thumbnail_url", "previewImage"),
    ("is_public", "isPublic"),
    ("created_at", "createdDate"),
    ("updated_at", "modifiedDate"),
];

const CATEGORY_NAMES: &[(&str, &str)] = &[
    ("name", "categoryName"),
    ("description", "categoryDescription"),
    ("id", "_id"),
    ("slug", "categorySlug"),
    ("sort_order", "order"),
    ("created_at", "createdDate"),
    ("updated_at", "modifiedDate"),
];

fn names_for(entity: &str) -> &'static [(&'static str, &'static str)] {
    match entity {
        "logo" => LOGO_NAMES,
        "category" => CATEGORY_NAMES,
        _ => &[],
    }
}

/// Legacy name of a canonical field, if the entity renames it.
pub fn legacy_name(entity: &str, canonical: &str) -> Option<&'static str> {
    names_for(entity)
        .iter()
        .find(|(c, _)| *c == canonical)
        .map(|(_, legacy)| *legacy)
}

/// Inverse of [`legacy_name`].
pub fn canonical_name(entity: &str, legacy: &str) -> Option<&'static str> {
    names_for(entity)
        .iter()
        .find(|(_, l)| *l == legacy)
        .map(|(canonical, _)| *canonical)
}

/// Canonical content under the pre-localization field names. Fields without a
/// legacy name keep their canonical one.
pub struct LegacyFormatter;

impl ResponseFormatter for LegacyFormatter {
    fn shape(&self) -> Shape {
        Shape::Legacy
    }

    fn format(&self, view: &ResolvedView) -> Value {
        let entity = view.entity();
        let mut doc = Map::new();

        let columns = view.structural().iter().chain(view.fields()).chain(view.relations());
        for (name, value) in columns {
            let key = legacy_name(entity, name).unwrap_or(name.as_str());
            doc.insert(key.to_string(), value.clone());
        }

        let language = view.locale().code();
        let direction = view.direction().as_str();
        doc.insert("language".to_string(), json!(language));
        doc.insert("direction".to_string(), json!(direction));
        doc.insert(
            "metadata".to_string(),
            json!({
                "legacyFormat": true,
                "language": language,
                "direction": direction,
            }),
        );
        Value::Object(doc)
    }
}
