pub mod engine;
pub mod export;
pub mod importer;
pub mod mapping;
pub mod tokenizer;
pub mod validate;

pub use crate::domain::model::{ImportOutcome, ImportRow, MemberId, MemberRecord};
pub use crate::domain::ports::{ConfigProvider, MemberStore, Storage};
pub use crate::utils::error::Result;
