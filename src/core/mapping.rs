use crate::core::tokenizer::parse_csv_line;
use crate::domain::model::ImportRow;
use crate::utils::error::{ImportError, Result};

/// The uploaded text split into a header and its data lines.
#[derive(Debug, Clone)]
pub struct CsvDocument<'a> {
    pub headers: Vec<String>,
    /// `(line number, raw line)`，行號從 1 開始且標題列為第 1 行
    pub lines: Vec<(usize, &'a str)>,
}

impl<'a> CsvDocument<'a> {
    pub fn parse(input: &'a str) -> Result<Self> {
        let all_lines: Vec<&str> = input.trim().lines().collect();

        if all_lines.len() < 2 {
            return Err(ImportError::format(
                "CSV file must contain headers and at least one data row",
            ));
        }

        let headers = parse_header(all_lines[0]);
        let lines = all_lines
            .into_iter()
            .enumerate()
            .skip(1)
            .map(|(index, line)| (index + 1, line))
            .collect();

        Ok(Self { headers, lines })
    }
}

/// 標題列同樣允許引號，欄名一律轉為小寫
pub fn parse_header(line: &str) -> Vec<String> {
    parse_csv_line(line)
        .into_iter()
        .map(|header| header.to_lowercase())
        .collect()
}

/// Map one data line onto the headers by position.
///
/// Returns `None` for a line whose fields are all blank.
pub fn map_row(headers: &[String], line: &str) -> Option<ImportRow> {
    let values = parse_csv_line(line);

    if values.iter().all(|value| value.trim().is_empty()) {
        return None;
    }

    let mut row = ImportRow::default();
    for (header, value) in headers.iter().zip(values.iter()) {
        row.set(header, value);
    }

    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(line: &str) -> Vec<String> {
        parse_header(line)
    }

    #[test]
    fn test_header_only_is_format_error() {
        let err = CsvDocument::parse("first_name,last_name\n").unwrap_err();
        assert!(matches!(err, ImportError::FormatError { .. }));

        let err = CsvDocument::parse("").unwrap_err();
        assert!(matches!(err, ImportError::FormatError { .. }));
    }

    #[test]
    fn test_quoted_headers_are_unquoted() {
        assert_eq!(headers(r#""First_Name","Last_Name""#), vec!["first_name", "last_name"]);
        assert_eq!(headers(r#""first_name,last_name"#), vec!["first_name,last_name"]);
    }

    #[test]
    fn test_document_numbers_lines_from_header() {
        let doc = CsvDocument::parse("First_Name , LAST_NAME\r\nJohn,Doe\r\nJane,Lee\r\n").unwrap();
        assert_eq!(doc.headers, vec!["first_name", "last_name"]);
        assert_eq!(doc.lines, vec![(2, "John,Doe"), (3, "Jane,Lee")]);
    }

    #[test]
    fn test_missing_trailing_values_are_absent() {
        let row = map_row(&headers("first_name,last_name,email,bio"), "John,Doe")
            .unwrap();
        assert_eq!(row.first_name.as_deref(), Some("John"));
        assert_eq!(row.email, None);
        assert_eq!(row.bio, None);
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(map_row(&headers("first_name,last_name"), " , "), None);
        assert_eq!(map_row(&headers("first_name,last_name"), ""), None);
    }

    #[test]
    fn test_stray_quote_row_still_maps() {
        let row = map_row(&headers("first_name,last_name,bio"), r#"Jane,Lee,Owns a 27" monitor"#)
            .unwrap();
        assert_eq!(row.last_name.as_deref(), Some("Lee"));
        assert_eq!(row.bio.as_deref(), Some("Owns a 27 monitor"));
    }

    #[test]
    fn test_unknown_headers_are_retained() {
        let row = map_row(&headers("first_name,last_name,team"), "John,Doe,Platform")
            .unwrap();
        assert_eq!(row.extra.get("team").map(String::as_str), Some("Platform"));
    }

    #[test]
    fn test_extra_values_beyond_headers_are_ignored() {
        let row = map_row(&headers("first_name,last_name"), "John,Doe,surplus")
            .unwrap();
        assert!(row.extra.is_empty());
        assert_eq!(row.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_repeated_header_keeps_last_value() {
        let row = map_row(&headers("first_name,last_name,email,email"), "John,Doe,a@x.com,b@x.com")
            .unwrap();
        assert_eq!(row.email.as_deref(), Some("b@x.com"));
    }
}
