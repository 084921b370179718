use crate::domain::model::{MemberId, MemberRecord};
use crate::utils::error::{Result, StoreError};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings needed to reach the hosted member store.
pub trait ConfigProvider: Send + Sync {
    fn store_endpoint(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn table(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// The only store capability the importer relies on: insert one member.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn insert_member(&self, record: &MemberRecord) -> std::result::Result<MemberId, StoreError>;
}
