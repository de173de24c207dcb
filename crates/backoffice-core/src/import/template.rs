use std::path::Path;

/// Column layout expected by the product import endpoint.
pub const TEMPLATE_HEADER: &str = "name,description,price,stock,category_id,image_url,tags";

/// Suggested download name for the template.
pub const TEMPLATE_FILE_NAME: &str = "products_template.csv";

const TEMPLATE_EXAMPLE_ROW: &str = "Sample Product,Short product description,150000,25,1,https://example.com/images/sample.jpg,\"new,featured\"";

/// The import template: header plus one example row. Built locally.
pub fn template_csv() -> String {
    format!("{TEMPLATE_HEADER}\n{TEMPLATE_EXAMPLE_ROW}\n")
}

/// Write the template to `path`.
pub fn write_template(path: &Path) -> std::io::Result<()> {
    std::fs::write(path, template_csv())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_header_and_one_row() {
        let csv = template_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TEMPLATE_HEADER);
        assert!(lines[1].starts_with("Sample Product,"));
    }

    #[test]
    fn example_row_quotes_tag_list() {
        let csv = template_csv();
        assert!(csv.contains("\"new,featured\""));
    }
}
