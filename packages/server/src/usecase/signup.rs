//! UseCase: アカウント登録

use std::sync::Arc;

use crate::domain::{Credential, Identity, IdentityRepository, Timestamp, Username};

use super::error::UseCaseError;

/// アカウント登録のユースケース
pub struct SignupUseCase {
    identities: Arc<dyn IdentityRepository>,
}

impl SignupUseCase {
    pub fn new(identities: Arc<dyn IdentityRepository>) -> Self {
        Self { identities }
    }

    /// ユーザー名が未登録であれば Identity を登録する
    pub async fn execute(
        &self,
        username: Username,
        credential: Credential,
    ) -> Result<(), UseCaseError> {
        let identity = Identity::new(username, credential, Timestamp::now());
        self.identities.register(identity).await?;
        Ok(())
    }
}
