pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "member-import")]
#[command(about = "Bulk import community members from a CSV file")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = "MEMBER_STORE_URL")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, env = "MEMBER_STORE_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Target table [default: members]")]
    pub table: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import members from a CSV file
    Import {
        file: String,

        /// Validate and import into an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Write the outcome as JSON to this path
        #[arg(long)]
        report: Option<String>,
    },
    /// Print the expected CSV header and an example file
    Template,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先，未指定的部分才使用設定檔
    pub fn apply_file_defaults(&mut self, file: &TomlConfig) {
        if self.endpoint.is_none() {
            self.endpoint = file.store.endpoint.clone();
        }
        if self.api_key.is_none() {
            self.api_key = file.store.api_key.clone();
        }
        if self.table.is_none() {
            self.table = file.store.table.clone();
        }
        if self.timeout_seconds.is_none() {
            self.timeout_seconds = file.store.timeout_seconds;
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn store_endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn table(&self) -> &str {
        self.table.as_deref().unwrap_or("members")
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}
