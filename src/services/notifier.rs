use std::str::FromStr;
use std::sync::Arc;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::auth::Role;
use crate::config::EmailConfig;

#[derive(Debug, Error)]
pub enum SendEmailError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("could not build message: {0}")]
    Build(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Blocking outbound mail delivery.
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendEmailError>;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, username: &str, password: &str, from: &str) -> Result<Self, SendEmailError> {
        let transport = SmtpTransport::relay(host)
            .map_err(|e| SendEmailError::Transport(e.to_string()))?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        let from = Mailbox::from_str(from).map_err(|e| SendEmailError::Address(e.to_string()))?;

        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendEmailError> {
        let to = Mailbox::from_str(to).map_err(|e| SendEmailError::Address(e.to_string()))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| SendEmailError::Build(e.to_string()))?;

        self.transport
            .send(&email)
            .map_err(|e| SendEmailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Used when no SMTP relay is configured: the mail is only logged.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), SendEmailError> {
        tracing::info!(to, subject, "email delivery disabled, message dropped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    pub fn from_config(config: &EmailConfig) -> Result<Self, SendEmailError> {
        let mailer: Arc<dyn Mailer> = match (&config.smtp_host, &config.smtp_username, &config.smtp_password) {
            (Some(host), Some(username), Some(password)) => {
                Arc::new(SmtpMailer::new(host, username, password, &config.from)?)
            }
            _ => {
                tracing::warn!("SMTP not configured; registration emails will only be logged");
                Arc::new(LogMailer)
            }
        };
        Ok(Self::new(mailer))
    }

    /// Sends in the background. Failures are logged and never reach the caller.
    pub fn send(&self, to: &str, subject: &str, body: String) -> JoinHandle<()> {
        let mailer = Arc::clone(&self.mailer);
        let to = to.to_string();
        let subject = subject.to_string();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = mailer.send(&to, &subject, &body) {
                tracing::error!(to = %to, "failed to send email: {}", e);
            }
        })
    }

    pub fn welcome(&self, role: Role, name: &str, email: &str) -> JoinHandle<()> {
        let body = format!(
            concat!(
                "Hello {},\n\nYour {} account has been registered.\n\n",
                "Login email: {}\n\nKeep your password private; it is never sent by email.\n",
            ),
            name,
            role.as_str().to_lowercase(),
            email
        );
        self.send(email, "Your Registration Details", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    impl Mailer for Recording {
        fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendEmailError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            if self.fail {
                return Err(SendEmailError::Transport("relay down".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn welcome_mail_names_the_account_without_password() {
        let mailer = Arc::new(Recording::default());
        let notifier = Notifier::new(mailer.clone());

        notifier.welcome(Role::Club, "Rovers", "rovers@example.com").await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "rovers@example.com");
        assert_eq!(subject, "Your Registration Details");
        assert!(body.contains("club account"));
        assert!(!body.to_lowercase().contains("password:"));
    }

    #[tokio::test]
    async fn delivery_failures_are_swallowed() {
        let mailer = Arc::new(Recording { fail: true, ..Default::default() });
        let notifier = Notifier::new(mailer.clone());

        notifier.send("x@example.com", "hi", "body".into()).await.unwrap();
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn unconfigured_smtp_falls_back_to_logging() {
        let config = EmailConfig {
            smtp_host: None,
            smtp_username: None,
            smtp_password: None,
            from: "noreply@example.com".into(),
        };
        assert!(Notifier::from_config(&config).is_ok());
    }
}
