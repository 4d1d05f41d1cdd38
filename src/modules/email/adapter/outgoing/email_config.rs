use crate::config::{parse_or, required, AppEnvironment, ConfigError};

#[derive(Debug, Clone, PartialEq)]
pub enum SmtpTransport {
    /// Authenticated TLS relay for production.
    Relay {
        server: String,
        username: String,
        password: String,
    },
    /// Plain local catcher such as Mailpit.
    Local { host: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from_email: String,
    pub transport: SmtpTransport,
}

impl EmailConfig {
    /// Development and test default to a local catcher unless `SMTP_SERVER` is set.
    pub fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let from_email =
            std::env::var("EMAIL_FROM").unwrap_or_else(|_| "noreply@auctionhub.com".to_string());

        let use_relay = environment.is_production() || std::env::var("SMTP_SERVER").is_ok();
        let transport = if use_relay {
            SmtpTransport::Relay {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }
        } else {
            SmtpTransport::Local {
                host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: parse_or("SMTP_PORT", 1025u16)?,
            }
        };

        Ok(Self {
            from_email,
            transport,
        })
    }
}
