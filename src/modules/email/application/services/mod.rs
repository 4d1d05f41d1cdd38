pub mod background;
pub mod email_notification_service;
pub mod templates;

pub use background::send_in_background;
pub use email_notification_service::EmailNotificationService;
