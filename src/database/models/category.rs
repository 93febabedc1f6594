use super::{ColumnDef, ColumnType, TableDef};
use crate::i18n::LocalizedAttribute;

pub static CATEGORIES: TableDef = TableDef {
    table: "categories",
    entity: "category",
    columns: &[
        ColumnDef::new("slug", ColumnType::Text),
        ColumnDef::new("icon_url", ColumnType::Text),
        ColumnDef::new("parent_id", ColumnType::Uuid),
        ColumnDef::new("sort_order", ColumnType::Integer),
        ColumnDef::new("is_active", ColumnType::Boolean),
    ],
    localized: &[
        LocalizedAttribute::text("name"),
        LocalizedAttribute::text("description"),
    ],
    required: &["name"],
    filterable: &["parent_id", "is_active", "slug"],
    searchable: &["name", "name_en", "name_ar"],
    default_order: "sort_order asc",
};
