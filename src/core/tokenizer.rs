/// Split one CSV line into trimmed fields.
///
/// A `"` opens or closes a quoted field, and commas inside quotes are kept.
/// Inside a quoted field `""` stands for a literal quote, which is what
/// [`members_to_csv`](crate::core::export::members_to_csv) writes. A quote
/// that is never closed keeps the rest of the line in the last field.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    // 最後一欄（引號未關閉時也照樣輸出）
    fields.push(current.trim().to_string());
    fields
}
