use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Keeps every message in memory. Stands in for SMTP in tests.
#[derive(Clone, Default)]
pub struct RecordingEmailSender {
    outbox: Arc<Mutex<Vec<SentEmail>>>,
}

impl RecordingEmailSender {
    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        self.outbox.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: body.to_string(),
        });
        Ok(())
    }
}
