pub mod email_config;
#[cfg(test)]
pub mod recording_sender;
pub mod smtp_sender;

pub use email_config::EmailConfig;
pub use smtp_sender::SmtpEmailSender;
