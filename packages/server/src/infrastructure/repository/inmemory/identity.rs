//! InMemory Identity Repository 実装
//!
//! username をキーとする HashMap で登録済みアカウントを保持します。
//! プロセス終了とともに破棄されます（永続化しない）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Credential, Identity, IdentityRepository, RepositoryError, Username};

/// インメモリ Identity Repository 実装
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<Username, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn register(&self, identity: Identity) -> Result<(), RepositoryError> {
        let mut identities = self.identities.lock().await;
        if identities.contains_key(&identity.username) {
            return Err(RepositoryError::DuplicateIdentity(
                identity.username.into_string(),
            ));
        }
        identities.insert(identity.username.clone(), identity);
        Ok(())
    }

    async fn verify(
        &self,
        username: &Username,
        credential: &Credential,
    ) -> Result<Identity, RepositoryError> {
        let identities = self.identities.lock().await;
        identities
            .get(username)
            .filter(|identity| identity.verify(credential))
            .cloned()
            .ok_or(RepositoryError::InvalidCredential)
    }

    async fn count(&self) -> usize {
        self.identities.lock().await.len()
    }
}
