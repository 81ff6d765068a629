//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct PermissionRow {
        #[tabled(rename = "PERMISSION")]
        permission: &'static str,
        #[tabled(rename = "GRANTED")]
        granted: &'static str,
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<PermissionRow> = vec![];
        assert_eq!(format_table(&rows), "No results found.");
    }

    #[test]
    fn test_format_table_rows_and_headers() {
        let rows = vec![
            PermissionRow {
                permission: "manageVcs",
                granted: "yes",
            },
            PermissionRow {
                permission: "manageTemplate",
                granted: "no",
            },
        ];

        let result = format_table(&rows);

        assert!(result.contains("PERMISSION"));
        assert!(result.contains("GRANTED"));
        assert!(result.contains("manageVcs"));
        assert!(result.contains("manageTemplate"));
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let rows = vec![PermissionRow {
            permission: "manageModule",
            granted: "yes",
        }];

        let result = format_table(&rows);

        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}
