use super::{ColumnDef, ColumnType, TableDef};
use crate::i18n::LocalizedAttribute;

pub const LOGO_ALIGNMENTS: &[&str] = &["start", "center", "end"];
pub const EXPORT_FORMATS: &[&str] = &["png", "svg", "jpg", "pdf", "webp"];

pub static LOGOS: TableDef = TableDef {
    table: "logos",
    entity: "logo",
    columns: &[
        ColumnDef::new("category_id", ColumnType::Uuid),
        ColumnDef::new("owner_id", ColumnType::Uuid),
        ColumnDef::new("template_id", ColumnType::Uuid),
        ColumnDef::new("canvas_width", ColumnType::Integer),
        ColumnDef::new("canvas_height", ColumnType::Integer),
        ColumnDef::new("background_color", ColumnType::Text),
        ColumnDef::new("background_gradient", ColumnType::Json),
        ColumnDef::new("background_image_url", ColumnType::Text),
        ColumnDef::new("thumbnail_url", ColumnType::Text),
        ColumnDef::one_of("horizontal_align", LOGO_ALIGNMENTS),
        ColumnDef::one_of("vertical_align", LOGO_ALIGNMENTS),
        ColumnDef::new("responsive", ColumnType::Json),
        ColumnDef::one_of("export_format", EXPORT_FORMATS),
        ColumnDef::new("export_quality", ColumnType::Integer),
        ColumnDef::new("transparent_background", ColumnType::Boolean),
        ColumnDef::new("is_public", ColumnType::Boolean),
        ColumnDef::new("is_template", ColumnType::Boolean),
    ],
    localized: &[
        LocalizedAttribute::text("title"),
        LocalizedAttribute::text("description"),
        LocalizedAttribute::list("tags"),
    ],
    required: &["title"],
    filterable: &["category_id", "owner_id", "template_id", "is_public", "is_template"],
    searchable: &["title", "title_en", "title_ar"],
    default_order: "created_at desc",
};
