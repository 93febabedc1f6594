//! Mobile client document. The mobile apps deserialize into fixed structs, so
//! every key is always emitted: absent data becomes `null` or a default.

use serde_json::{json, Map, Value};

use super::{or_null, present, ResponseFormatter, Shape};
use crate::i18n::{resolve_attribute, LocalizedAttribute, ResolvedView};

const DOCUMENT_VERSION: u32 = 1;
const DEFAULT_ALIGN: &str = "center";
const DEFAULT_EXPORT_FORMAT: &str = "png";
const DEFAULT_EXPORT_QUALITY: u32 = 100;
const DEFAULT_SCALE_MODE: &str = "fit";

/// Text layer content is localized inside the layer's `properties`.
const LAYER_CONTENT: LocalizedAttribute = LocalizedAttribute::text("content");

/// Flat mobile document: entity fields and document groups side by side.
pub struct MobileFormatter;

/// Entity fields under `logo`, document groups under `document`.
pub struct MobileStructuredFormatter;

impl ResponseFormatter for MobileFormatter {
    fn shape(&self) -> Shape {
        Shape::Mobile
    }

    fn format(&self, view: &ResolvedView) -> Value {
        let mut doc = summary(view);
        doc.extend(document_groups(view));
        doc.insert("language".to_string(), json!(view.locale().code()));
        doc.insert("direction".to_string(), json!(view.direction().as_str()));
        Value::Object(doc)
    }
}

impl ResponseFormatter for MobileStructuredFormatter {
    fn shape(&self) -> Shape {
        Shape::MobileStructured
    }

    fn format(&self, view: &ResolvedView) -> Value {
        let mut document = Map::new();
        document.insert("version".to_string(), json!(DOCUMENT_VERSION));
        document.extend(document_groups(view));

        json!({
            "logo": Value::Object(summary(view)),
            "document": Value::Object(document),
            "language": view.locale().code(),
            "direction": view.direction().as_str(),
        })
    }
}

/// Identity, resolved text and ownership fields.
fn summary(view: &ResolvedView) -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert("id".to_string(), or_null(view.structural_value("id")));
    for (name, value) in view.fields() {
        doc.insert(name.clone(), value.clone());
    }
    for (column, key) in [
        ("category_id", "categoryId"),
        ("owner_id", "ownerId"),
        ("thumbnail_url", "thumbnailUrl"),
        ("created_at", "createdAt"),
        ("updated_at", "updatedAt"),
    ] {
        doc.insert(key.to_string(), or_null(view.structural_value(column)));
    }
    doc.insert("isPublic".to_string(), flag(view.structural_value("is_public"), false));
    doc.insert("isTemplate".to_string(), flag(view.structural_value("is_template"), false));
    doc
}

fn document_groups(view: &ResolvedView) -> Map<String, Value> {
    let layers = layer_rows(view);
    let width = or_null(view.structural_value("canvas_width"));
    let height = or_null(view.structural_value("canvas_height"));

    let mut groups = Map::new();
    groups.insert("canvas".to_string(), canvas(view, &width, &height));
    groups.insert(
        "layers".to_string(),
        Value::Array(layers.iter().map(|layer| mobile_layer(view, layer)).collect()),
    );
    groups.insert("colorsUsed".to_string(), colors_used(view, &layers));
    groups.insert(
        "alignment".to_string(),
        json!({
            "horizontal": text_or(view.structural_value("horizontal_align"), DEFAULT_ALIGN),
            "vertical": text_or(view.structural_value("vertical_align"), DEFAULT_ALIGN),
        }),
    );
    groups.insert("responsive".to_string(), responsive(view.structural_value("responsive")));
    groups.insert(
        "export".to_string(),
        json!({
            "format": text_or(view.structural_value("export_format"), DEFAULT_EXPORT_FORMAT),
            "quality": present(view.structural_value("export_quality"))
                .cloned()
                .unwrap_or_else(|| json!(DEFAULT_EXPORT_QUALITY)),
            "transparentBackground": flag(view.structural_value("transparent_background"), false),
            "width": width,
            "height": height,
        }),
    );
    groups
}

fn canvas(view: &ResolvedView, width: &Value, height: &Value) -> Value {
    let color = or_null(view.structural_value("background_color"));
    let gradient = or_null(view.structural_value("background_gradient"));
    let image_url = or_null(view.structural_value("background_image_url"));

    let kind = if !image_url.is_null() {
        "image"
    } else if !gradient.is_null() {
        "gradient"
    } else if !color.is_null() {
        "solid"
    } else {
        "none"
    };

    json!({
        "width": width,
        "height": height,
        "background": {
            "type": kind,
            "color": color,
            "gradient": gradient,
            "imageUrl": image_url,
        },
    })
}

/// Related layer rows, lowest `z_index` first.
fn layer_rows(view: &ResolvedView) -> Vec<&Map<String, Value>> {
    let mut rows: Vec<&Map<String, Value>> = match view.related("layers") {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    };
    rows.sort_by_key(|row| row.get("z_index").and_then(Value::as_i64).unwrap_or(0));
    rows
}

fn properties(layer: &Map<String, Value>) -> Map<String, Value> {
    match layer.get("properties") {
        Some(Value::Object(props)) => props.clone(),
        _ => Map::new(),
    }
}

/// First non-null value among `keys`. Older rows stored camelCase properties.
fn pick(props: &Map<String, Value>, keys: &[&str]) -> Value {
    keys.iter()
        .find_map(|key| present(props.get(*key)))
        .cloned()
        .unwrap_or(Value::Null)
}

fn mobile_layer(view: &ResolvedView, layer: &Map<String, Value>) -> Value {
    let props = properties(layer);
    let layer_type = layer.get("layer_type").and_then(Value::as_str).unwrap_or_default();

    let text = (layer_type == "text").then(|| {
        json!({
            "content": resolve_attribute(&props, &LAYER_CONTENT, view.locale()),
            "fontFamily": pick(&props, &["font_family", "fontFamily"]),
            "fontSize": pick(&props, &["font_size", "fontSize"]),
            "fontWeight": pick(&props, &["font_weight", "fontWeight"]),
            "color": pick(&props, &["color"]),
            "textAlign": pick(&props, &["text_align", "textAlign"]),
            "direction": view.direction().as_str(),
        })
    });
    let shape = (layer_type == "shape").then(|| {
        json!({
            "shapeType": pick(&props, &["shape_type", "shapeType"]),
            "fill": pick(&props, &["fill"]),
            "stroke": pick(&props, &["stroke"]),
            "strokeWidth": pick(&props, &["stroke_width", "strokeWidth"]),
            "cornerRadius": pick(&props, &["corner_radius", "cornerRadius"]),
        })
    });
    let image = (layer_type == "image").then(|| {
        json!({
            "url": pick(&props, &["url"]),
            "assetId": pick(&props, &["asset_id", "assetId"]),
            "fit": pick(&props, &["fit"]),
        })
    });
    let icon = (layer_type == "icon").then(|| {
        json!({
            "name": pick(&props, &["icon_name", "iconName"]),
            "assetId": pick(&props, &["asset_id", "assetId"]),
            "color": pick(&props, &["color"]),
        })
    });

    json!({
        "id": or_null(layer.get("id")),
        "type": layer_type,
        "name": or_null(layer.get("name")),
        "zIndex": present(layer.get("z_index")).cloned().unwrap_or_else(|| json!(0)),
        "position": { "x": number_or(layer.get("x"), 0.0), "y": number_or(layer.get("y"), 0.0) },
        "size": { "width": or_null(layer.get("width")), "height": or_null(layer.get("height")) },
        "rotation": number_or(layer.get("rotation"), 0.0),
        "opacity": number_or(layer.get("opacity"), 1.0),
        "visible": flag(layer.get("visible"), true),
        "locked": flag(layer.get("locked"), false),
        "text": text,
        "shape": shape,
        "image": image,
        "icon": icon,
    })
}

/// Every distinct color with where it is used. Colors compare
/// case-insensitively; the first spelling seen is kept.
fn colors_used(view: &ResolvedView, layers: &[&Map<String, Value>]) -> Value {
    let mut entries: Vec<(String, Vec<Value>)> = Vec::new();
    let mut record = |color: Option<&Value>, layer_id: Value, property: &str| {
        let Some(color) = color.and_then(Value::as_str).map(str::trim).filter(|c| !c.is_empty()) else {
            return;
        };
        let usage = json!({ "layerId": layer_id, "property": property });
        match entries.iter_mut().find(|(seen, _)| seen.eq_ignore_ascii_case(color)) {
            Some((_, usages)) => usages.push(usage),
            None => entries.push((color.to_string(), vec![usage])),
        }
    };

    record(view.structural_value("background_color"), Value::Null, "background");
    for layer in layers {
        let props = properties(layer);
        let id = or_null(layer.get("id"));
        for property in ["color", "fill", "stroke"] {
            record(props.get(property), id.clone(), property);
        }
    }

    Value::Array(
        entries
            .into_iter()
            .map(|(color, usages)| json!({ "color": color, "usages": usages }))
            .collect(),
    )
}

fn responsive(stored: Option<&Value>) -> Value {
    let settings = match stored {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    json!({
        "enabled": flag(settings.get("enabled"), false),
        "minWidth": pick(&settings, &["min_width", "minWidth"]),
        "maxWidth": pick(&settings, &["max_width", "maxWidth"]),
        "scaleMode": text_or(settings.get("scale_mode").or_else(|| settings.get("scaleMode")), DEFAULT_SCALE_MODE),
        "preserveAspectRatio": flag(
            settings.get("preserve_aspect_ratio").or_else(|| settings.get("preserveAspectRatio")),
            true,
        ),
    })
}

fn flag(value: Option<&Value>, default: bool) -> Value {
    Value::Bool(value.and_then(Value::as_bool).unwrap_or(default))
}

fn text_or(value: Option<&Value>, default: &str) -> Value {
    match value.and_then(Value::as_str).filter(|s| !s.trim().is_empty()) {
        Some(s) => json!(s),
        None => json!(default),
    }
}

fn number_or(value: Option<&Value>, default: f64) -> Value {
    match present(value) {
        Some(v) if v.is_number() => v.clone(),
        _ => json!(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::fixtures;

    fn layers() -> Value {
        json!([
            {
                "id": "b", "layer_type": "shape", "name": "Badge", "z_index": 2,
                "x": 10, "y": 20, "width": 100, "height": 100,
                "properties": { "shape_type": "circle", "fill": "#ff0000", "stroke": "#FFFFFF" }
            },
            {
                "id": "a", "layer_type": "text", "name": "Wordmark", "z_index": 1,
                "properties": {
                    "content": "Acme", "content_ar": "أكمي",
                    "font_family": "Inter", "color": "#FF0000"
                }
            }
        ])
    }

    fn logo(lang: &str) -> ResolvedView {
        fixtures::logo_view(lang).with_related("layers", layers())
    }

    #[test]
    fn absent_groups_are_emitted_with_defaults() {
        let doc = MobileFormatter.format(&fixtures::logo_view("en"));
        assert_eq!(doc["layers"], json!([]));
        assert_eq!(doc["alignment"], json!({ "horizontal": "center", "vertical": "center" }));
        assert_eq!(doc["export"]["format"], "png");
        assert_eq!(doc["export"]["quality"], 100);
        assert_eq!(doc["export"]["width"], 800);
        assert_eq!(doc["responsive"]["enabled"], false);
        assert_eq!(doc["responsive"]["minWidth"], Value::Null);
        assert_eq!(doc["responsive"]["preserveAspectRatio"], true);
        assert_eq!(doc["canvas"]["background"]["type"], "solid");
        assert_eq!(doc["canvas"]["background"]["gradient"], Value::Null);
        assert!(doc.as_object().unwrap().contains_key("thumbnailUrl"));
        assert_eq!(doc["ownerId"], Value::Null);
    }

    #[test]
    fn layers_are_ordered_with_one_type_object_each() {
        let doc = MobileFormatter.format(&logo("en"));
        let layers = doc["layers"].as_array().unwrap();
        assert_eq!(layers[0]["id"], "a");
        assert_eq!(layers[0]["text"]["content"], "Acme");
        assert_eq!(layers[0]["shape"], Value::Null);
        assert_eq!(layers[0]["opacity"], 1.0);
        assert_eq!(layers[0]["visible"], true);
        assert_eq!(layers[1]["shape"]["shapeType"], "circle");
        assert_eq!(layers[1]["text"], Value::Null);
        assert_eq!(layers[1]["position"], json!({ "x": 10, "y": 20 }));
        for layer in layers {
            for key in ["text", "shape", "image", "icon", "size", "rotation", "locked"] {
                assert!(layer.as_object().unwrap().contains_key(key), "{}", key);
            }
        }
    }

    #[test]
    fn text_layer_content_follows_the_locale() {
        let doc = MobileFormatter.format(&logo("ar"));
        assert_eq!(doc["layers"][0]["text"]["content"], "أكمي");
        assert_eq!(doc["layers"][0]["text"]["direction"], "rtl");
        assert_eq!(doc["title"], "شعار");
    }

    #[test]
    fn colors_are_deduplicated_with_usages() {
        let doc = MobileFormatter.format(&logo("en"));
        let colors = doc["colorsUsed"].as_array().unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0]["color"], "#FFFFFF");
        assert_eq!(colors[0]["usages"].as_array().unwrap().len(), 2);
        assert_eq!(colors[1]["color"], "#FF0000");
        assert_eq!(colors[1]["usages"][0], json!({ "layerId": "a", "property": "color" }));
        assert_eq!(colors[1]["usages"][1], json!({ "layerId": "b", "property": "fill" }));
    }

    #[test]
    fn structured_shape_splits_logo_and_document() {
        let doc = MobileStructuredFormatter.format(&logo("ar"));
        assert_eq!(doc["logo"]["title"], "شعار");
        assert_eq!(doc["logo"]["isPublic"], false);
        assert_eq!(doc["document"]["version"], 1);
        assert_eq!(doc["document"]["layers"].as_array().unwrap().len(), 2);
        assert_eq!(doc["document"]["canvas"]["width"], 800);
        assert_eq!(doc["language"], "ar");
        assert!(doc.get("canvas").is_none());
    }

    #[test]
    fn responsive_settings_accept_older_camel_case_keys() {
        let settings = responsive(Some(&json!({ "enabled": true, "minWidth": 320, "scaleMode": "fill" })));
        assert_eq!(settings["enabled"], true);
        assert_eq!(settings["minWidth"], 320);
        assert_eq!(settings["scaleMode"], "fill");
    }
}
