use crate::core::ConfigProvider;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TABLE: &str = "members";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// dry run 時是否模擬 email 唯一索引
    pub unique_emails: Option<bool>,
    pub report_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MEMBER_STORE_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.store.endpoint {
            validate_url("store.endpoint", endpoint)?;
        }

        if let Some(api_key) = &self.store.api_key {
            if api_key.starts_with("${") {
                return Err(ImportError::MissingConfigError {
                    field: format!("store.api_key (environment variable {} is not set)", api_key),
                });
            }
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validate_range("store.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(report_path) = &self.import.report_path {
            validate_path("import.report_path", report_path)?;
        }

        Ok(())
    }

    pub fn unique_emails(&self) -> bool {
        self.import.unique_emails.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn store_endpoint(&self) -> Option<&str> {
        self.store.endpoint.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.store.api_key.as_deref()
    }

    fn table(&self) -> &str {
        self.store.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.store.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
