use crate::core::importer::MemberImporter;
use crate::core::{ImportOutcome, MemberStore, Storage};
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::validate_file_extension;

/// Reads an uploaded file from [`Storage`] and feeds it to the importer.
pub struct ImportEngine<St: Storage, S: MemberStore> {
    storage: St,
    importer: MemberImporter<S>,
}

impl<St: Storage, S: MemberStore> ImportEngine<St, S> {
    pub fn new(storage: St, store: S) -> Self {
        Self {
            storage,
            importer: MemberImporter::new(store),
        }
    }

    pub async fn run(&self, file: &str) -> Result<ImportOutcome> {
        validate_file_extension("file", file, &["csv"])?;

        tracing::info!("📥 Reading member file: {}", file);
        let bytes = self.storage.read_file(file).await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            ImportError::format(format!("file is not valid UTF-8: {}", e))
        })?;

        // 試算表軟體匯出的檔案常帶 BOM
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let outcome = self.importer.import(text).await?;

        if outcome.failed > 0 {
            tracing::warn!(
                "⚠️ {} of {} row(s) failed to import",
                outcome.failed,
                outcome.processed()
            );
        } else {
            tracing::info!("✅ All {} row(s) imported", outcome.success);
        }

        Ok(outcome)
    }

    /// 匯入後把結果以 JSON 寫回儲存空間
    pub async fn run_with_report(&self, file: &str, report_path: &str) -> Result<ImportOutcome> {
        let outcome = self.run(file).await?;

        let json = serde_json::to_string_pretty(&outcome)?;
        self.storage.write_file(report_path, json.as_bytes()).await?;
        tracing::info!("📁 Import report saved to: {}", report_path);

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryMemberStore;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ImportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_strips_bom_and_imports() {
        let storage = MockStorage::default();
        storage
            .put("members.csv", "\u{feff}first_name,last_name\nJohn,Doe\n".as_bytes())
            .await;

        let store = MemoryMemberStore::new();
        let engine = ImportEngine::new(storage, store.clone());

        let outcome = engine.run("members.csv").await.unwrap();

        assert_eq!(outcome.success, 1);
        assert_eq!(store.members().await[0].first_name, "John");
    }

    #[tokio::test]
    async fn test_run_rejects_non_csv_file() {
        let engine = ImportEngine::new(MockStorage::default(), MemoryMemberStore::new());

        let err = engine.run("members.xlsx").await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_run_missing_file_is_io_error() {
        let engine = ImportEngine::new(MockStorage::default(), MemoryMemberStore::new());

        let err = engine.run("missing.csv").await.unwrap_err();
        assert!(matches!(err, ImportError::IoError(_)));
    }

    #[tokio::test]
    async fn test_run_with_report_writes_json() {
        let storage = MockStorage::default();
        storage
            .put("members.csv", b"first_name,last_name\nJohn,Doe\n,Lee\n")
            .await;

        let engine = ImportEngine::new(storage.clone(), MemoryMemberStore::new());
        let outcome = engine
            .run_with_report("members.csv", "reports/members.json")
            .await
            .unwrap();

        assert_eq!(outcome.failed, 1);

        let report = storage.get_file("reports/members.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&report).unwrap();
        assert_eq!(json["success"], 1);
        assert_eq!(json["errors"][0]["row"], 3);
    }
}
