use std::sync::Arc;

use crate::modules::auth::application::orchestrator::UserRegistrationOrchestrator;
use crate::modules::auth::application::use_cases::{
    fetch_profile::FetchUserProfileUseCase, login_user::ILoginUserUseCase,
    verify_user_email::IVerifyUserEmailUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    /// Signup and resend-verification, both of which mail a code.
    pub registration: Arc<UserRegistrationOrchestrator>,
    pub login: Arc<dyn ILoginUserUseCase>,
    pub verify_email: Arc<dyn IVerifyUserEmailUseCase>,
    pub fetch_profile: Arc<dyn FetchUserProfileUseCase>,
}
