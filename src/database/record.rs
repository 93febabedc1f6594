use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::database::models::{ColumnDef, ColumnType, TableDef, SYSTEM_COLUMNS};
use crate::i18n::{AttributeKind, Locale};

/// A database row as produced by `row_to_json`.
pub type Row = Map<String, Value>;

/// Errors that can occur while validating client input
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(String),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidType { field: String, expected: &'static str },
    #[error("Invalid UUID format for field '{field}': {value}")]
    InvalidUuid { field: String, value: String },
    #[error("Invalid value for field '{field}': must be one of {allowed}")]
    NotAllowed { field: String, allowed: String },
    #[error("No writable fields provided")]
    NoFields,
}

impl RecordError {
    /// Field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::SystemFieldNotAllowed(field)
            | RecordError::MissingRequiredField(field) => Some(field),
            RecordError::UnknownField { field, .. }
            | RecordError::InvalidType { field, .. }
            | RecordError::InvalidUuid { field, .. }
            | RecordError::NotAllowed { field, .. } => Some(field),
            RecordError::InvalidJson(_) | RecordError::NoFields => None,
        }
    }
}

/// A value typed for binding to a Postgres parameter. `None` binds SQL NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Integer(Option<i64>),
    Float(Option<f64>),
    Boolean(Option<bool>),
    Uuid(Option<Uuid>),
    TextArray(Option<Vec<String>>),
    Json(Option<Value>),
}

impl SqlValue {
    /// Convert a JSON input value for a column of type `ty`.
    pub fn from_json(field: &str, ty: ColumnType, value: &Value) -> Result<Self, RecordError> {
        let invalid = || RecordError::InvalidType {
            field: field.to_string(),
            expected: ty.label(),
        };

        if value.is_null() {
            return Ok(Self::null(ty));
        }

        match ty {
            ColumnType::Text => value
                .as_str()
                .map(|s| SqlValue::Text(Some(s.to_string())))
                .ok_or_else(invalid),
            ColumnType::Integer => value.as_i64().map(|n| SqlValue::Integer(Some(n))).ok_or_else(invalid),
            ColumnType::Float => value.as_f64().map(|n| SqlValue::Float(Some(n))).ok_or_else(invalid),
            ColumnType::Boolean => value.as_bool().map(|b| SqlValue::Boolean(Some(b))).ok_or_else(invalid),
            ColumnType::Uuid => {
                let s = value.as_str().ok_or_else(invalid)?;
                Self::parse_uuid(field, s)
            }
            ColumnType::TextArray => {
                let items = value.as_array().ok_or_else(invalid)?;
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|items| SqlValue::TextArray(Some(items)))
            }
            ColumnType::Json => Ok(SqlValue::Json(Some(value.clone()))),
        }
    }

    /// Convert a query-string value (always text on the wire).
    pub fn from_param(field: &str, ty: ColumnType, raw: &str) -> Result<Self, RecordError> {
        let invalid = || RecordError::InvalidType {
            field: field.to_string(),
            expected: ty.label(),
        };

        match ty {
            ColumnType::Text => Ok(SqlValue::Text(Some(raw.to_string()))),
            ColumnType::Integer => raw.parse().map(|n| SqlValue::Integer(Some(n))).map_err(|_| invalid()),
            ColumnType::Float => raw.parse().map(|n| SqlValue::Float(Some(n))).map_err(|_| invalid()),
            ColumnType::Boolean => match raw {
                "true" | "1" => Ok(SqlValue::Boolean(Some(true))),
                "false" | "0" => Ok(SqlValue::Boolean(Some(false))),
                _ => Err(invalid()),
            },
            ColumnType::Uuid => Self::parse_uuid(field, raw),
            ColumnType::TextArray | ColumnType::Json => Err(invalid()),
        }
    }

    fn parse_uuid(field: &str, raw: &str) -> Result<Self, RecordError> {
        Uuid::parse_str(raw)
            .map(|id| SqlValue::Uuid(Some(id)))
            .map_err(|_| RecordError::InvalidUuid {
                field: field.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn null(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Text => SqlValue::Text(None),
            ColumnType::Integer => SqlValue::Integer(None),
            ColumnType::Float => SqlValue::Float(None),
            ColumnType::Boolean => SqlValue::Boolean(None),
            ColumnType::Uuid => SqlValue::Uuid(None),
            ColumnType::TextArray => SqlValue::TextArray(None),
            ColumnType::Json => SqlValue::Json(None),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Integer(v) => v.is_none(),
            SqlValue::Float(v) => v.is_none(),
            SqlValue::Boolean(v) => v.is_none(),
            SqlValue::Uuid(v) => v.is_none(),
            SqlValue::TextArray(v) => v.is_none(),
            SqlValue::Json(v) => v.is_none(),
        }
    }

    /// Null, whitespace-only text or an empty list: nothing a reader would see.
    pub fn is_blank(&self) -> bool {
        match self {
            SqlValue::Text(Some(text)) => text.trim().is_empty(),
            SqlValue::TextArray(Some(items)) => items.is_empty(),
            other => other.is_null(),
        }
    }
}

/// Validated column assignments for an INSERT or UPDATE.
#[derive(Debug, Clone)]
pub struct WriteSet {
    table: &'static TableDef,
    assignments: BTreeMap<String, SqlValue>,
}

impl WriteSet {
    /// Validate client input against the table definition.
    ///
    /// Localizable attributes sent under their base name (`title`) are stored
    /// in the column of `locale` (`title_ar`); explicitly suffixed columns are
    /// taken as-is and win over a base-name value for the same column. The
    /// unsuffixed legacy columns are never written.
    pub fn from_input(table: &'static TableDef, input: Value, locale: Locale) -> Result<Self, RecordError> {
        let map = match input {
            Value::Object(map) => map,
            _ => return Err(RecordError::InvalidJson("Expected JSON object".to_string())),
        };

        let mut routed = BTreeMap::new();
        let mut explicit = BTreeMap::new();

        for (key, value) in &map {
            if SYSTEM_COLUMNS.contains(&key.as_str()) {
                return Err(RecordError::SystemFieldNotAllowed(key.clone()));
            }

            if let Some(attr) = table.localized_attribute(key) {
                let column = locale.column_for(attr.name);
                routed.insert(column.clone(), SqlValue::from_json(&column, localized_type(attr.kind), value)?);
            } else if let Some(attr) = table.localized_column(key) {
                explicit.insert(key.clone(), SqlValue::from_json(key, localized_type(attr.kind), value)?);
            } else if let Some(column) = table.column(key) {
                explicit.insert(key.clone(), structural_value(column, value)?);
            } else {
                return Err(RecordError::UnknownField {
                    entity: table.entity,
                    field: key.clone(),
                });
            }
        }

        routed.extend(explicit);
        Ok(Self {
            table,
            assignments: routed,
        })
    }

    /// Server-side assignment (e.g. `logo_id` taken from the route).
    pub fn assign(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.assignments.insert(column.into(), value);
        self
    }

    /// Check create-time required attributes. A localizable attribute is
    /// satisfied by any of its locale columns holding a non-blank value.
    pub fn require(&self, required: &[&str]) -> Result<(), RecordError> {
        for name in required {
            let present = match self.table.localized_attribute(name) {
                Some(attr) => self
                    .assignments
                    .iter()
                    .any(|(column, value)| attr.owns_column(column) && !value.is_blank()),
                None => self.assignments.get(*name).map(|v| !v.is_blank()).unwrap_or(false),
            };
            if !present {
                return Err(RecordError::MissingRequiredField(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn ensure_not_empty(&self) -> Result<(), RecordError> {
        if self.is_empty() {
            Err(RecordError::NoFields)
        } else {
            Ok(())
        }
    }

    pub fn table(&self) -> &'static TableDef {
        self.table
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.assignments.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.assignments.iter().map(|(column, value)| (column.as_str(), value))
    }
}

fn localized_type(kind: AttributeKind) -> ColumnType {
    match kind {
        AttributeKind::Text => ColumnType::Text,
        AttributeKind::List => ColumnType::TextArray,
    }
}

fn structural_value(column: &ColumnDef, value: &Value) -> Result<SqlValue, RecordError> {
    let sql_value = SqlValue::from_json(column.name, column.ty, value)?;
    if let (Some(allowed), SqlValue::Text(Some(text))) = (column.allowed, &sql_value) {
        if !allowed.contains(&text.as_str()) {
            return Err(RecordError::NotAllowed {
                field: column.name.to_string(),
                allowed: allowed.join(", "),
            });
        }
    }
    Ok(sql_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ASSETS, CATEGORIES, LAYERS, LOGOS};
    use serde_json::json;

    fn ar() -> Locale {
        Locale::select(Some("ar"))
    }

    #[test]
    fn base_names_are_routed_to_the_request_locale() {
        let set = WriteSet::from_input(&LOGOS, json!({ "title": "شعار", "tags": ["أ"] }), ar()).unwrap();
        assert_eq!(set.get("title_ar"), Some(&SqlValue::Text(Some("شعار".into()))));
        assert_eq!(set.get("tags_ar"), Some(&SqlValue::TextArray(Some(vec!["أ".into()]))));
        assert!(set.get("title").is_none(), "legacy column must never be written");
    }

    #[test]
    fn explicit_locale_columns_win() {
        let set = WriteSet::from_input(
            &LOGOS,
            json!({ "title": "routed", "title_ar": "explicit", "title_en": "english" }),
            ar(),
        )
        .unwrap();
        assert_eq!(set.get("title_ar"), Some(&SqlValue::Text(Some("explicit".into()))));
        assert_eq!(set.get("title_en"), Some(&SqlValue::Text(Some("english".into()))));
    }

    #[test]
    fn rejects_system_and_unknown_fields() {
        let err = WriteSet::from_input(&LOGOS, json!({ "id": "x" }), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::SystemFieldNotAllowed(ref f) if f == "id"));

        let err = WriteSet::from_input(&LOGOS, json!({ "title_fr": "x" }), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::UnknownField { ref field, .. } if field == "title_fr"));
    }

    #[test]
    fn rejects_non_objects() {
        let err = WriteSet::from_input(&LOGOS, json!([1, 2]), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidJson(_)));
    }

    #[test]
    fn type_checks_structural_columns() {
        let err = WriteSet::from_input(&LOGOS, json!({ "canvas_width": "wide" }), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidType { expected: "integer", .. }));

        let err = WriteSet::from_input(&LOGOS, json!({ "category_id": "nope" }), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidUuid { .. }));

        let err = WriteSet::from_input(&LOGOS, json!({ "tags_en": ["ok", 3] }), Locale::default()).unwrap_err();
        assert_eq!(err.field(), Some("tags_en"));
    }

    #[test]
    fn enforces_closed_value_sets() {
        let err = WriteSet::from_input(&LAYERS, json!({ "layer_type": "video" }), Locale::default()).unwrap_err();
        assert!(matches!(err, RecordError::NotAllowed { ref field, .. } if field == "layer_type"));

        let ok = WriteSet::from_input(&ASSETS, json!({ "kind": "svg" }), Locale::default());
        assert!(ok.is_ok());
    }

    #[test]
    fn null_binds_typed_null() {
        let set = WriteSet::from_input(&LOGOS, json!({ "category_id": null }), Locale::default()).unwrap();
        assert_eq!(set.get("category_id"), Some(&SqlValue::Uuid(None)));
    }

    #[test]
    fn required_localized_attribute_accepts_any_locale_column() {
        let set = WriteSet::from_input(&CATEGORIES, json!({ "name_ar": "فئة" }), Locale::default()).unwrap();
        assert!(set.require(&["name"]).is_ok());

        let set = WriteSet::from_input(&CATEGORIES, json!({ "slug": "x" }), Locale::default()).unwrap();
        assert!(matches!(set.require(&["name"]), Err(RecordError::MissingRequiredField(_))));
    }

    #[test]
    fn blank_text_does_not_satisfy_requirements() {
        for body in [json!({ "title": "" }), json!({ "title_en": "   ", "title_ar": null })] {
            let set = WriteSet::from_input(&LOGOS, body, Locale::default()).unwrap();
            assert!(matches!(set.require(&["title"]), Err(RecordError::MissingRequiredField(_))));
        }

        let set = WriteSet::from_input(&LOGOS, json!({ "title_en": " ", "title_ar": "شعار" }), ar()).unwrap();
        assert!(set.require(&["title"]).is_ok());

        let set = WriteSet::from_input(&CATEGORIES, json!({ "name": "Tech", "slug": "  " }), Locale::default()).unwrap();
        assert!(matches!(set.require(&["name", "slug"]), Err(RecordError::MissingRequiredField(ref f)) if f == "slug"));
    }

    #[test]
    fn empty_updates_are_rejected() {
        let set = WriteSet::from_input(&LOGOS, json!({}), Locale::default()).unwrap();
        assert!(set.is_empty());
        assert!(matches!(set.ensure_not_empty(), Err(RecordError::NoFields)));
    }

    #[test]
    fn server_assignments_satisfy_requirements() {
        let logo_id = Uuid::new_v4();
        let set = WriteSet::from_input(&LAYERS, json!({ "layer_type": "text" }), Locale::default())
            .unwrap()
            .assign("logo_id", SqlValue::Uuid(Some(logo_id)));
        assert!(set.require(&["logo_id", "layer_type"]).is_ok());
    }

    #[test]
    fn query_params_parse_by_column_type() {
        assert_eq!(
            SqlValue::from_param("is_public", ColumnType::Boolean, "true").unwrap(),
            SqlValue::Boolean(Some(true))
        );
        assert!(SqlValue::from_param("canvas_width", ColumnType::Integer, "abc").is_err());
        assert!(SqlValue::from_param("owner_id", ColumnType::Uuid, "abc").is_err());
    }
}
