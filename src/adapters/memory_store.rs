use crate::domain::model::{MemberId, MemberRecord};
use crate::domain::ports::MemberStore;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct StoredMember {
    pub id: MemberId,
    pub record: MemberRecord,
    pub created_at: DateTime<Utc>,
}

/// In-process member store used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryMemberStore {
    members: Arc<Mutex<Vec<StoredMember>>>,
    unique_emails: bool,
}

impl MemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a second member with the same email (case-insensitive), like a
    /// unique index on the hosted table would.
    pub fn with_unique_emails() -> Self {
        Self {
            unique_emails: true,
            ..Self::default()
        }
    }

    pub async fn members(&self) -> Vec<MemberRecord> {
        let members = self.members.lock().await;
        members.iter().map(|m| m.record.clone()).collect()
    }

    pub async fn stored(&self) -> Vec<StoredMember> {
        self.members.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.lock().await.is_empty()
    }
}

#[async_trait]
impl MemberStore for MemoryMemberStore {
    async fn insert_member(&self, record: &MemberRecord) -> Result<MemberId, StoreError> {
        let mut members = self.members.lock().await;

        if let Some(email) = record.email.as_ref().filter(|_| self.unique_emails) {
            let taken = members
                .iter()
                .any(|m| m.record.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)));
            if taken {
                return Err(StoreError::rejected(
                    "duplicate key value violates unique constraint \"members_email_key\"",
                ));
            }
        }

        let id = MemberId(format!("mem-{}", members.len() + 1));
        members.push(StoredMember {
            id: id.clone(),
            record: record.clone(),
            created_at: Utc::now(),
        });

        Ok(id)
    }
}
