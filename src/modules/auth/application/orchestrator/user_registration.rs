use std::sync::Arc;

use crate::modules::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase, SignupRequest,
};
use crate::modules::auth::application::use_cases::resend_verification::{
    IResendVerificationUseCase, ResendVerificationError, ResendVerificationOutput,
};
use crate::modules::email::application::ports::outgoing::{UserEmailNotifier, VerificationEmail};
use crate::modules::email::application::services::send_in_background;

const VERIFICATION_EMAIL_ATTEMPTS: u32 = 3;

// ============================================================================
// User Registration Orchestrator
// ============================================================================

/// Couples the account use cases with delivery of the verification email.
///
/// Email goes out on a background task; the HTTP response never waits for SMTP.
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase>,
    resend_verification_use_case: Arc<dyn IResendVerificationUseCase>,
    email_notifier: Arc<dyn UserEmailNotifier>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase>,
        resend_verification_use_case: Arc<dyn IResendVerificationUseCase>,
        email_notifier: Arc<dyn UserEmailNotifier>,
    ) -> Self {
        Self {
            create_user_use_case,
            resend_verification_use_case,
            email_notifier,
        }
    }

    pub async fn register_user(
        &self,
        request: SignupRequest,
    ) -> Result<CreateUserOutput, CreateUserError> {
        let created = self.create_user_use_case.execute(request).await?;

        self.dispatch_verification_email(VerificationEmail {
            email: created.user.email.clone(),
            name: created.user.name.clone(),
            code: created.verification_code.clone(),
        });

        Ok(created)
    }

    pub async fn resend_verification(
        &self,
        email: &str,
    ) -> Result<ResendVerificationOutput, ResendVerificationError> {
        let reissued = self.resend_verification_use_case.execute(email).await?;

        self.dispatch_verification_email(VerificationEmail {
            email: reissued.user.email.clone(),
            name: reissued.user.name.clone(),
            code: reissued.verification_code.clone(),
        });

        Ok(reissued)
    }

    fn dispatch_verification_email(&self, message: VerificationEmail) {
        let notifier = self.email_notifier.clone();
        send_in_background("verification", VERIFICATION_EMAIL_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let message = message.clone();
            async move { notifier.send_verification_email(message).await }
        });
    }
}
