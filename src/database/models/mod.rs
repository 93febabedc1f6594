//! Static table definitions.
//!
//! Rows are read as JSON objects (`row_to_json`), so the definitions here are
//! what tells the write path which columns exist, how to bind them, and which
//! attributes are stored as per-language triplets.

pub mod asset;
pub mod category;
pub mod layer;
pub mod logo;
pub mod user;

use crate::i18n::{AttributeKind, LocalizedAttribute};

pub use asset::ASSETS;
pub use category::CATEGORIES;
pub use layer::LAYERS;
pub use logo::LOGOS;
pub use user::USERS;

/// Postgres type a column is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
    Uuid,
    TextArray,
    Json,
}

impl ColumnType {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Uuid => "uuid",
            ColumnType::TextArray => "array of strings",
            ColumnType::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    /// Closed set of accepted values, for enum-like text columns
    pub allowed: Option<&'static [&'static str]>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty, allowed: None }
    }

    pub const fn one_of(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { name, ty: ColumnType::Text, allowed: Some(allowed) }
    }
}

/// Columns maintained by the database, never accepted from clients.
pub const SYSTEM_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

#[derive(Debug)]
pub struct TableDef {
    pub table: &'static str,
    /// Singular label used in messages and resolved views
    pub entity: &'static str,
    /// Writable structural columns
    pub columns: &'static [ColumnDef],
    /// Attributes stored as `A`, `A_en`, `A_ar`
    pub localized: &'static [LocalizedAttribute],
    /// Attributes a create request must provide
    pub required: &'static [&'static str],
    /// Columns a list request may filter on by equality
    pub filterable: &'static [&'static str],
    /// Columns searched by `?search=`
    pub searchable: &'static [&'static str],
    pub default_order: &'static str,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn localized_attribute(&self, name: &str) -> Option<&LocalizedAttribute> {
        self.localized.iter().find(|a| a.name == name)
    }

    /// The attribute owning `column` when it is one of its locale columns.
    pub fn localized_column(&self, column: &str) -> Option<&LocalizedAttribute> {
        self.localized
            .iter()
            .find(|a| a.locale_of_column(column).is_some())
    }

    pub fn is_localized(&self) -> bool {
        !self.localized.is_empty()
    }

    /// Bind type of any readable column, localized columns included.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        if let Some(column) = self.column(name) {
            return Some(column.ty);
        }
        if SYSTEM_COLUMNS.contains(&name) {
            return Some(match name {
                "id" => ColumnType::Uuid,
                _ => ColumnType::Text,
            });
        }
        self.localized
            .iter()
            .find(|a| a.owns_column(name))
            .map(|a| match a.kind {
                AttributeKind::Text => ColumnType::Text,
                AttributeKind::List => ColumnType::TextArray,
            })
    }

    /// Any column that exists on the table, usable in ORDER BY.
    pub fn is_known_column(&self, name: &str) -> bool {
        self.column_type(name).is_some()
    }
}
