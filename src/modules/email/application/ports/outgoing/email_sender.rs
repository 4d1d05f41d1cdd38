use async_trait::async_trait;

/// Delivers one HTML message. Errors are transport text; callers only log them.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}
