use crate::core::mapping::{map_row, CsvDocument};
use crate::core::validate::to_member_record;
use crate::domain::model::{ImportOutcome, RowErrorData, RowFailure};
use crate::domain::ports::MemberStore;
use crate::utils::error::{Result, RowError};
use chrono::Utc;

/// Bulk member import over an injected [`MemberStore`].
///
/// Rows are handled one at a time in file order. A bad row is recorded in the
/// outcome and the import moves on; only a file without data rows fails the
/// whole call.
pub struct MemberImporter<S: MemberStore> {
    store: S,
}

impl<S: MemberStore> MemberImporter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn import(&self, csv_data: &str) -> Result<ImportOutcome> {
        let started_at = Utc::now();
        let document = CsvDocument::parse(csv_data)?;

        tracing::debug!(
            "Importing {} data line(s) with columns: {}",
            document.lines.len(),
            document.headers.join(", ")
        );

        let mut success = 0;
        let mut errors = Vec::new();

        for (row, line) in document.lines.iter().copied() {
            let Some(mapped) = map_row(&document.headers, line) else {
                tracing::debug!("Skipping empty row {}", row);
                continue;
            };

            let record = match to_member_record(&mapped) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Row {}: {}", row, e);
                    errors.push(failure(row, &e, RowErrorData::Row(mapped)));
                    continue;
                }
            };

            match self.store.insert_member(&record).await {
                Ok(id) => {
                    tracing::debug!("Row {} inserted as member {}", row, id);
                    success += 1;
                }
                Err(e) => {
                    let e = RowError::from(e);
                    tracing::warn!("Row {}: store rejected insert: {}", row, e);
                    errors.push(failure(row, &e, RowErrorData::Record(record)));
                }
            }
        }

        let outcome = ImportOutcome {
            success,
            failed: errors.len(),
            errors,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Import finished: {} succeeded, {} failed",
            outcome.success,
            outcome.failed
        );

        Ok(outcome)
    }
}

fn failure(row: usize, error: &RowError, data: RowErrorData) -> RowFailure {
    RowFailure {
        row,
        error: error.to_string(),
        kind: error.kind(),
        data,
    }
}
