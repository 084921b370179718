use crate::domain::model::{ImportRow, MemberRecord};
use crate::utils::error::RowError;

/// Turn a mapped row into a [`MemberRecord`].
///
/// `city` and `linkedin` are accepted as aliases; the canonical column wins
/// when both are filled. `years_with_te` is parsed leniently: the leading
/// digits are kept (`"2.5"` is 2, `"3 years"` is 3), and a value without
/// leading digits or with a minus sign is dropped while the row still imports.
pub fn to_member_record(row: &ImportRow) -> Result<MemberRecord, RowError> {
    let (first_name, last_name) = match (&row.first_name, &row.last_name) {
        (Some(first), Some(last)) => (first.clone(), last.clone()),
        (first, last) => {
            let mut missing = Vec::new();
            if first.is_none() {
                missing.push("first_name");
            }
            if last.is_none() {
                missing.push("last_name");
            }
            return Err(RowError::Validation { missing });
        }
    };

    Ok(MemberRecord {
        first_name,
        last_name,
        email: row.email.clone(),
        current_city: row.current_city.clone().or_else(|| row.city.clone()),
        phone: row.phone.clone(),
        linkedin_url: row.linkedin_url.clone().or_else(|| row.linkedin.clone()),
        years_with_te: row.years_with_te.as_deref().and_then(parse_years),
        bio: row.bio.clone(),
    })
}

fn parse_years(value: &str) -> Option<u32> {
    let unsigned = value.trim();
    let unsigned = unsigned.strip_prefix('+').unwrap_or(unsigned);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..digits_end].parse::<u32>() {
        Ok(years) => Some(years),
        Err(_) => {
            tracing::debug!("Ignoring non-numeric years_with_te value: {:?}", value);
            None
        }
    }
}
