use super::{ColumnDef, ColumnType, TableDef};

pub static USERS: TableDef = TableDef {
    table: "users",
    entity: "user",
    columns: &[
        ColumnDef::new("email", ColumnType::Text),
        ColumnDef::new("display_name", ColumnType::Text),
        ColumnDef::new("avatar_url", ColumnType::Text),
        ColumnDef::new("preferred_language", ColumnType::Text),
        ColumnDef::new("is_active", ColumnType::Boolean),
    ],
    localized: &[],
    required: &["email"],
    filterable: &["email", "is_active"],
    searchable: &["email", "display_name"],
    default_order: "created_at desc",
};
