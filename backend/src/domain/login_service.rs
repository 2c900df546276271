//! Password login against stored cook credentials.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CookRepository, LoginService};
use crate::domain::{CookId, EntityKind, Error, LoginCredentials};

use super::kitchen_service::map_repository_error;

/// [`LoginService`] that checks passwords against cook digests.
#[derive(Clone)]
pub struct PasswordLoginService<C> {
    cooks: Arc<C>,
}

impl<C> PasswordLoginService<C> {
    /// Authenticate against `cooks`.
    pub fn new(cooks: Arc<C>) -> Self {
        Self { cooks }
    }
}

#[async_trait]
impl<C> LoginService for PasswordLoginService<C>
where
    C: CookRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CookId, Error> {
        let stored = self
            .cooks
            .find_credentials(credentials.username())
            .await
            .map_err(|error| map_repository_error(EntityKind::Cook, error))?;

        match stored {
            Some(stored) if stored.password_digest.verify(credentials.password()) => Ok(stored.id),
            Some(_) => {
                debug!(username = credentials.username(), "password mismatch");
                Err(Error::unauthorized("invalid credentials"))
            }
            None => {
                debug!(username = credentials.username(), "unknown username");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Credential checks against a mocked cook store.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{KitchenRepositoryError, MockCookRepository};
    use crate::domain::{CookCredentials, PasswordDigest};
    use rstest::rstest;

    fn service_with(
        stored: Result<Option<CookCredentials>, KitchenRepositoryError>,
    ) -> PasswordLoginService<MockCookRepository> {
        let mut cooks = MockCookRepository::new();
        cooks
            .expect_find_credentials()
            .withf(|username| username == "chef1")
            .return_const(stored);
        PasswordLoginService::new(Arc::new(cooks))
    }

    fn chef_credentials() -> CookCredentials {
        CookCredentials {
            id: CookId::new(7),
            password_digest: PasswordDigest::derive("pasta-al-dente").expect("hashed"),
        }
    }

    #[rstest]
    #[case("pasta-al-dente", true)]
    #[case("wrong-password", false)]
    #[tokio::test]
    async fn verifies_the_password(#[case] password: &str, #[case] should_succeed: bool) {
        let service = service_with(Ok(Some(chef_credentials())));
        let creds = LoginCredentials::try_from_parts("chef1", password).expect("credentials");
        let result = service.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(id)) => assert_eq!(id, CookId::new(7)),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_username_is_unauthorized() {
        let service = service_with(Ok(None));
        let creds = LoginCredentials::try_from_parts("chef1", "anything").expect("credentials");
        let err = service.authenticate(&creds).await.expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let service = service_with(Err(KitchenRepositoryError::connection("refused")));
        let creds = LoginCredentials::try_from_parts("chef1", "anything").expect("credentials");
        let err = service.authenticate(&creds).await.expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
