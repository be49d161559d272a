//! 메모리 기반 검증 레코드 저장소
//!
//! 하나의 뮤텍스 아래에서 조회와 삭제를 함께 수행하므로 `consume`은 원자적입니다.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::errors::AppResult;
use crate::domain::entities::verifications::{VerificationKind, VerificationRecord};
use crate::repositories::verifications::verification_repo::VerificationRepository;

#[derive(Default)]
struct VerificationState {
    records: HashMap<(VerificationKind, String), VerificationRecord>,
    owners: HashMap<(VerificationKind, String), String>,
}

#[derive(Default)]
pub struct InMemoryVerificationRepository {
    state: Mutex<VerificationState>,
}

impl InMemoryVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn store(&self, digest: &str, record: VerificationRecord) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let kind = record.kind;

        if let Some(previous) = state.owners.insert((kind, record.email.clone()), digest.to_string()) {
            if previous != digest {
                state.records.remove(&(kind, previous));
            }
        }
        state.records.insert((kind, digest.to_string()), record);
        Ok(())
    }

    async fn find(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>> {
        let state = self.state.lock().await;
        Ok(state.records.get(&(kind, digest.to_string())).cloned())
    }

    async fn consume(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>> {
        let mut state = self.state.lock().await;
        let record = state.records.remove(&(kind, digest.to_string()));

        if let Some(ref record) = record {
            let owner = (kind, record.email.clone());
            if state.owners.get(&owner).map(String::as_str) == Some(digest) {
                state.owners.remove(&owner);
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(kind: VerificationKind, email: &str) -> VerificationRecord {
        VerificationRecord::new(kind, email, Utc::now() + Duration::hours(1))
    }

    #[actix_web::test]
    async fn test_consume_is_single_use() {
        let repo = InMemoryVerificationRepository::new();
        repo.store("d1", record(VerificationKind::Password, "ana@example.com")).await.unwrap();

        assert!(repo.find(VerificationKind::Password, "d1").await.unwrap().is_some());
        assert!(repo.consume(VerificationKind::Password, "d1").await.unwrap().is_some());
        assert!(repo.consume(VerificationKind::Password, "d1").await.unwrap().is_none());
        assert_eq!(repo.len().await, 0);
    }

    #[actix_web::test]
    async fn test_new_record_revokes_previous_of_same_kind() {
        let repo = InMemoryVerificationRepository::new();
        repo.store("old", record(VerificationKind::MfaCode, "ana@example.com")).await.unwrap();
        repo.store("account", record(VerificationKind::Account, "ana@example.com")).await.unwrap();
        repo.store("new", record(VerificationKind::MfaCode, "ana@example.com")).await.unwrap();

        assert!(repo.find(VerificationKind::MfaCode, "old").await.unwrap().is_none());
        assert!(repo.find(VerificationKind::MfaCode, "new").await.unwrap().is_some());
        assert!(repo.find(VerificationKind::Account, "account").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_kinds_do_not_share_keys() {
        let repo = InMemoryVerificationRepository::new();
        repo.store("same", record(VerificationKind::Account, "ana@example.com")).await.unwrap();

        assert!(repo.consume(VerificationKind::Password, "same").await.unwrap().is_none());
        assert!(repo.consume(VerificationKind::Account, "same").await.unwrap().is_some());
    }
}
