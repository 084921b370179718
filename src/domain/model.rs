use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One non-empty data line, keyed by lower-cased header.
///
/// Known columns get their own slot; anything else lands in `extra` so files
/// with additional columns still import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_with_te: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ImportRow {
    /// 設定欄位值；空白值視為缺漏，重複欄位以後者為準
    pub fn set(&mut self, header: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let value = value.to_string();

        match header {
            "first_name" => self.first_name = Some(value),
            "last_name" => self.last_name = Some(value),
            "email" => self.email = Some(value),
            "current_city" => self.current_city = Some(value),
            "city" => self.city = Some(value),
            "phone" => self.phone = Some(value),
            "linkedin_url" => self.linkedin_url = Some(value),
            "linkedin" => self.linkedin = Some(value),
            "years_with_te" => self.years_with_te = Some(value),
            "bio" => self.bio = Some(value),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// A validated member, ready to hand to a [`MemberStore`](crate::domain::ports::MemberStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_with_te: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl MemberRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            current_city: None,
            phone: None,
            linkedin_url: None,
            years_with_te: None,
            bio: None,
        }
    }
}

/// Identity the store assigns to an inserted member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    Validation,
    Store,
}

/// What the error entry carries, depending on where the row failed.
///
/// Written into reports only; the two shapes are not told apart on the way
/// back in, so this is never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowErrorData {
    Row(ImportRow),
    Record(MemberRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub error: String,
    pub kind: RowErrorKind,
    pub data: RowErrorData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<RowFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportOutcome {
    pub fn processed(&self) -> usize {
        self.success + self.failed
    }

    /// 與匯入頁面相同的摘要格式
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Successfully imported {} member(s)", self.success)];
        if self.failed > 0 {
            lines.push(format!("Failed to import {} member(s)", self.failed));
        }
        for failure in &self.errors {
            lines.push(format!("Row {}: {}", failure.row, failure.error));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_data_serializes_without_tag() {
        let mut record = MemberRecord::new("Bo", "Ray");
        record.email = Some("dup@x.com".to_string());

        let json = serde_json::to_value(RowErrorData::Record(record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"first_name": "Bo", "last_name": "Ray", "email": "dup@x.com"})
        );

        let mut row = ImportRow::default();
        row.set("last_name", "Lee");
        row.set("team", "Platform");
        let json = serde_json::to_value(RowErrorData::Row(row)).unwrap();
        assert_eq!(json, serde_json::json!({"last_name": "Lee", "team": "Platform"}));
    }
}
