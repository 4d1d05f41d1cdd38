use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::{
    domain::entities::User,
    ports::outgoing::UserQuery,
    use_cases::fetch_profile::{FetchUserError, FetchUserProfileUseCase},
};

pub struct FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    user_query: Q,
}

impl<Q> FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { user_query: query }
    }
}

#[async_trait]
impl<Q> FetchUserProfileUseCase for FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError> {
        self.user_query
            .find_by_id(user_id)
            .await?
            .ok_or(FetchUserError::UserNotFound(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::sample_user;
    use crate::modules::auth::application::ports::outgoing::user_query::UserQueryError;

    struct FixedUserQuery {
        result: Result<Option<User>, UserQueryError>,
    }

    #[async_trait]
    impl UserQuery for FixedUserQuery {
        async fn find_by_id(&self, _user_id: Uuid) -> Result<Option<User>, UserQueryError> {
            self.result.clone()
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserQueryError> {
            unimplemented!("not used by profile lookups")
        }
    }

    #[tokio::test]
    async fn returns_existing_user() {
        let user = sample_user();
        let service = FetchUserProfileService::new(FixedUserQuery {
            result: Ok(Some(user.clone())),
        });

        assert_eq!(service.execute(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let service = FetchUserProfileService::new(FixedUserQuery { result: Ok(None) });
        let id = Uuid::new_v4();

        assert!(matches!(
            service.execute(id).await,
            Err(FetchUserError::UserNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn unavailable_database_is_distinguished() {
        let service = FetchUserProfileService::new(FixedUserQuery {
            result: Err(UserQueryError::Unavailable("connection refused".into())),
        });

        assert!(matches!(
            service.execute(Uuid::new_v4()).await,
            Err(FetchUserError::Unavailable(_))
        ));
    }
}
