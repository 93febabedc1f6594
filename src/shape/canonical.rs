use serde_json::{Map, Value};

use super::{ResponseFormatter, Shape};
use crate::i18n::ResolvedView;

/// Structural columns unchanged, localizable attributes under their base
/// names, plus `language` and `direction`.
pub struct CanonicalFormatter;

impl ResponseFormatter for CanonicalFormatter {
    fn shape(&self) -> Shape {
        Shape::Canonical
    }

    fn format(&self, view: &ResolvedView) -> Value {
        let mut doc: Map<String, Value> = view.structural().clone();
        for (name, value) in view.fields() {
            doc.insert(name.clone(), value.clone());
        }
        for (key, related) in view.relations() {
            doc.insert(key.clone(), related.clone());
        }
        doc.insert("language".to_string(), Value::String(view.locale().code().to_string()));
        doc.insert("direction".to_string(), Value::String(view.direction().to_string()));
        Value::Object(doc)
    }
}
