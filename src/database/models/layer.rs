use super::{ColumnDef, ColumnType, TableDef};

pub const LAYER_TYPES: &[&str] = &["text", "shape", "image", "icon"];

/// Layers belong to a logo and are ordered by `z_index`. Type-specific settings
/// (font, fill, asset reference) live in the `properties` JSON column.
pub static LAYERS: TableDef = TableDef {
    table: "layers",
    entity: "layer",
    columns: &[
        ColumnDef::new("logo_id", ColumnType::Uuid),
        ColumnDef::one_of("layer_type", LAYER_TYPES),
        ColumnDef::new("name", ColumnType::Text),
        ColumnDef::new("z_index", ColumnType::Integer),
        ColumnDef::new("x", ColumnType::Float),
        ColumnDef::new("y", ColumnType::Float),
        ColumnDef::new("width", ColumnType::Float),
        ColumnDef::new("height", ColumnType::Float),
        ColumnDef::new("rotation", ColumnType::Float),
        ColumnDef::new("opacity", ColumnType::Float),
        ColumnDef::new("visible", ColumnType::Boolean),
        ColumnDef::new("locked", ColumnType::Boolean),
        ColumnDef::new("properties", ColumnType::Json),
    ],
    localized: &[],
    required: &["logo_id", "layer_type"],
    filterable: &["logo_id", "layer_type"],
    searchable: &["name"],
    default_order: "z_index asc",
};
