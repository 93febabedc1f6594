use crate::database::models::TableDef;

use super::error::FilterError;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `"created_at desc, title_en"`; every column must exist on the table.
    pub fn validate_and_parse(table: &TableDef, order: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in order.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            let (Some(column), dir, None) = (it.next(), it.next(), it.next()) else {
                return Err(FilterError::InvalidOrder(trimmed.to_string()));
            };
            if !table.is_known_column(column) {
                return Err(FilterError::InvalidColumn(column.to_string()));
            }
            let sort = match dir {
                None => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(d) => return Err(FilterError::InvalidOrder(format!("unknown direction '{}'", d))),
            };
            out.push(FilterOrderInfo { column: column.to_string(), sort });
        }
        Ok(out)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::LOGOS;

    #[test]
    fn parses_columns_and_directions() {
        let infos = FilterOrder::validate_and_parse(&LOGOS, "created_at desc, title_en").unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].sort, SortDirection::Desc);
        assert_eq!(infos[1].column, "title_en");
        assert_eq!(infos[1].sort, SortDirection::Asc);
        assert_eq!(
            FilterOrder::generate(&infos),
            "ORDER BY \"created_at\" DESC, \"title_en\" ASC"
        );
    }

    #[test]
    fn rejects_unknown_columns_and_directions() {
        assert!(matches!(
            FilterOrder::validate_and_parse(&LOGOS, "\"; DROP TABLE logos"),
            Err(FilterError::InvalidColumn(_)) | Err(FilterError::InvalidOrder(_))
        ));
        assert!(matches!(
            FilterOrder::validate_and_parse(&LOGOS, "created_at sideways"),
            Err(FilterError::InvalidOrder(_))
        ));
    }
}
