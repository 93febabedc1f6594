use super::{ColumnDef, ColumnType, TableDef};

pub const ASSET_KINDS: &[&str] = &["image", "icon", "font", "svg"];

/// Assets are registered by URL; the bytes live elsewhere.
pub static ASSETS: TableDef = TableDef {
    table: "assets",
    entity: "asset",
    columns: &[
        ColumnDef::new("name", ColumnType::Text),
        ColumnDef::one_of("kind", ASSET_KINDS),
        ColumnDef::new("url", ColumnType::Text),
        ColumnDef::new("mime_type", ColumnType::Text),
        ColumnDef::new("size_bytes", ColumnType::Integer),
        ColumnDef::new("width", ColumnType::Integer),
        ColumnDef::new("height", ColumnType::Integer),
        ColumnDef::new("owner_id", ColumnType::Uuid),
    ],
    localized: &[],
    required: &["name", "kind", "url"],
    filterable: &["owner_id", "kind"],
    searchable: &["name"],
    default_order: "created_at desc",
};
