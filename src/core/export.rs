use crate::domain::model::MemberRecord;
use crate::utils::error::{ImportError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Column order used for exported files; also the import template header.
pub const MEMBER_COLUMNS: [&str; 8] = [
    "first_name",
    "last_name",
    "email",
    "current_city",
    "phone",
    "linkedin_url",
    "years_with_te",
    "bio",
];

/// Render members as CSV text that the importer reads back.
///
/// Every cell is quoted and embedded quotes are doubled. Absent values become
/// empty cells. Newlines inside values are not supported by the importer.
/// The importer trims every value and treats blank ones as absent, so
/// `Some("")` reads back as `None` and surrounding whitespace is lost.
pub fn members_to_csv(members: &[MemberRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(MEMBER_COLUMNS)?;

    for member in members {
        let years = member.years_with_te.map(|y| y.to_string());
        writer.write_record([
            member.first_name.as_str(),
            member.last_name.as_str(),
            member.email.as_deref().unwrap_or(""),
            member.current_city.as_deref().unwrap_or(""),
            member.phone.as_deref().unwrap_or(""),
            member.linkedin_url.as_deref().unwrap_or(""),
            years.as_deref().unwrap_or(""),
            member.bio.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))?;

    String::from_utf8(bytes)
        .map_err(|e| ImportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Header line plus the sample rows shown on the import page.
pub fn import_template() -> String {
    let mut template = MEMBER_COLUMNS.join(",");
    template.push('\n');
    template.push_str("John,Doe,john@example.com,New York,,,2,\n");
    template.push_str("Jane,Smith,jane@example.com,San Francisco,,,3,\n");
    template.push_str("Bob,Johnson,bob@example.com,Chicago,,,1,\n");
    template
}
