pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Command, CliConfig};

pub use adapters::{MemoryMemberStore, RestMemberStore};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{engine::ImportEngine, importer::MemberImporter};
pub use domain::model::{ImportOutcome, MemberRecord};
pub use utils::error::{ImportError, Result};
