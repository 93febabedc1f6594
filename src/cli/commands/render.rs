use anyhow::{anyhow, bail};
use serde_json::Value;
use std::path::Path;

use crate::cli::utils::{print_json, read_json};
use crate::database::models::{TableDef, CATEGORIES, LOGOS};
use crate::i18n::{Locale, ResolvedView};
use crate::shape::Shape;

pub fn handle(file: &Path, shape: Shape, lang: Option<&str>, entity: &str, layers: Option<&Path>) -> anyhow::Result<()> {
    let row = read_json(file)?;
    let layers = layers.map(read_json).transpose()?;
    let document = render_document(row, shape, lang, entity, layers)?;
    print_json(&document)
}

fn table_for(entity: &str) -> anyhow::Result<&'static TableDef> {
    match entity {
        "logo" => Ok(&LOGOS),
        "category" => Ok(&CATEGORIES),
        other => bail!("cannot render '{}': expected logo or category", other),
    }
}

/// Resolve `row` for `lang` and shape it, exactly as the server would.
pub fn render_document(
    row: Value,
    shape: Shape,
    lang: Option<&str>,
    entity: &str,
    layers: Option<Value>,
) -> anyhow::Result<Value> {
    let table = table_for(entity)?;
    let Value::Object(row) = row else {
        return Err(anyhow!("row file must hold a JSON object"));
    };

    let mut view = ResolvedView::resolve(table.entity, table.localized, &row, Locale::select(lang));
    if let Some(layers) = layers {
        if !layers.is_array() {
            bail!("layers file must hold a JSON array");
        }
        view = view.with_related("layers", layers);
    }
    Ok(shape.formatter().format(&view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_each_shape_offline() {
        let row = json!({ "id": "x", "title": "Old", "title_ar": "شعار" });
        let doc = render_document(row.clone(), Shape::Canonical, Some("ar"), "logo", None).unwrap();
        assert_eq!(doc["title"], "شعار");

        let doc = render_document(row, Shape::Legacy, None, "logo", None).unwrap();
        assert_eq!(doc["logoName"], "Old");
        assert_eq!(doc["language"], "en");
    }

    #[test]
    fn attaches_layers_for_mobile() {
        let layers = json!([{ "id": "l1", "layer_type": "icon", "properties": { "icon_name": "star" } }]);
        let doc = render_document(json!({ "id": "x" }), Shape::Mobile, None, "logo", Some(layers)).unwrap();
        assert_eq!(doc["layers"][0]["icon"]["name"], "star");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(render_document(json!([]), Shape::Canonical, None, "logo", None).is_err());
        assert!(render_document(json!({}), Shape::Canonical, None, "layer", None).is_err());
        assert!(render_document(json!({}), Shape::Mobile, None, "logo", Some(json!({}))).is_err());
    }
}
