#[derive(Debug, Clone, PartialEq)]
pub struct VerificationEmail {
    pub email: String,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        message: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError>;
}
