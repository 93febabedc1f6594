//! Field resolution: reduce per-language column triplets to one value per attribute.
//!
//! Every localizable attribute `A` is stored three ways: the legacy unsuffixed
//! column `A` (rows written before localization existed) and one column per
//! locale (`A_en`, `A_ar`). Resolution walks [`FALLBACK_CHAIN`] and takes the
//! first non-empty value, so partially migrated rows never surface nulls.

use serde::Serialize;
use serde_json::{Map, Value};

use super::locale::Locale;
use super::registry::{LocaleRegistry, TextDirection};

/// Value type of a localizable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    /// Ordered list of strings (tags). Lists are taken whole, never merged.
    List,
}

impl AttributeKind {
    /// Value emitted when every column in the chain is empty.
    pub fn empty(&self) -> Value {
        match self {
            AttributeKind::Text => Value::String(String::new()),
            AttributeKind::List => Value::Array(Vec::new()),
        }
    }

    /// Normalize a stored value, returning `None` when it counts as empty.
    fn normalize(&self, value: &Value) -> Option<Value> {
        match self {
            AttributeKind::Text => match value {
                Value::String(s) if !s.trim().is_empty() => Some(value.clone()),
                Value::Number(n) => Some(Value::String(n.to_string())),
                _ => None,
            },
            AttributeKind::List => {
                let items = match value {
                    Value::Array(items) => list_items(items),
                    Value::String(s) => parse_list_text(s),
                    _ => Vec::new(),
                };
                if items.is_empty() {
                    None
                } else {
                    Some(Value::Array(items.into_iter().map(Value::String).collect()))
                }
            }
        }
    }
}

fn list_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Older rows keep tags as text: either a JSON array or a comma-separated list.
fn parse_list_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return list_items(&items);
        }
    }
    trimmed
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// A localizable attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedAttribute {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl LocalizedAttribute {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: AttributeKind::Text }
    }

    pub const fn list(name: &'static str) -> Self {
        Self { name, kind: AttributeKind::List }
    }

    /// True for the legacy column and every locale column of this attribute.
    pub fn owns_column(&self, column: &str) -> bool {
        if column == self.name {
            return true;
        }
        column
            .strip_prefix(self.name)
            .and_then(|rest| rest.strip_prefix('_'))
            .map(LocaleRegistry::is_supported)
            .unwrap_or(false)
    }

    /// Locale code of `column` if it is one of this attribute's locale columns.
    pub fn locale_of_column(&self, column: &str) -> Option<&'static str> {
        column
            .strip_prefix(self.name)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(LocaleRegistry::get_by_code)
            .map(|config| config.code)
    }
}

/// Where a step of the fallback chain reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnSource {
    /// `A_<requested locale>`
    Requested,
    /// Unsuffixed legacy column `A`
    Legacy,
    /// `A_<default locale>`, skipped when the default locale was requested
    DefaultLocale,
}

/// Evaluated in order; the typed empty value closes the chain.
const FALLBACK_CHAIN: [ColumnSource; 3] = [
    ColumnSource::Requested,
    ColumnSource::Legacy,
    ColumnSource::DefaultLocale,
];

impl ColumnSource {
    fn column(self, attr: &str, locale: Locale) -> Option<String> {
        match self {
            ColumnSource::Requested => Some(locale.column_for(attr)),
            ColumnSource::Legacy => Some(attr.to_string()),
            ColumnSource::DefaultLocale if locale.is_default() => None,
            ColumnSource::DefaultLocale => Some(Locale::default().column_for(attr)),
        }
    }
}

/// Resolve one attribute of `record` for `locale`. Total: never fails, never null.
pub fn resolve_attribute(record: &Map<String, Value>, attr: &LocalizedAttribute, locale: Locale) -> Value {
    FALLBACK_CHAIN
        .iter()
        .filter_map(|source| source.column(attr.name, locale))
        .find_map(|column| record.get(&column).and_then(|value| attr.kind.normalize(value)))
        .unwrap_or_else(|| attr.kind.empty())
}

/// Per-request projection of an entity onto a single locale.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedView {
    entity: &'static str,
    locale: Locale,
    direction: TextDirection,
    fields: Map<String, Value>,
    structural: Map<String, Value>,
    related: Map<String, Value>,
}

impl ResolvedView {
    /// Resolve every localizable attribute and keep the remaining columns as
    /// structural data, untouched.
    pub fn resolve(
        entity: &'static str,
        attributes: &[LocalizedAttribute],
        record: &Map<String, Value>,
        locale: Locale,
    ) -> Self {
        let fields = attributes
            .iter()
            .map(|attr| (attr.name.to_string(), resolve_attribute(record, attr, locale)))
            .collect();

        let structural = record
            .iter()
            .filter(|(column, _)| !attributes.iter().any(|attr| attr.owns_column(column)))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect();

        Self {
            entity,
            locale,
            direction: locale.direction(),
            fields,
            structural,
            related: Map::new(),
        }
    }

    /// Attach related rows (a logo's layers) before the view is shaped.
    pub fn with_related(mut self, key: impl Into<String>, value: Value) -> Self {
        self.related.insert(key.into(), value);
        self
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn structural(&self) -> &Map<String, Value> {
        &self.structural
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Structural column value; a stored SQL NULL reads as `None`.
    pub fn structural_value(&self, name: &str) -> Option<&Value> {
        self.structural.get(name).filter(|value| !value.is_null())
    }

    pub fn related(&self, key: &str) -> Option<&Value> {
        self.related.get(key)
    }

    pub fn relations(&self) -> &Map<String, Value> {
        &self.related
    }
}
