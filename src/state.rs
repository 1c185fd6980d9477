use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{password::PasswordHasher, Authenticators};
use crate::config::AppConfig;
use crate::services::{MediaError, MediaUploader, Notifier, SendEmailError};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub auth: Arc<Authenticators>,
    pub hasher: PasswordHasher,
    pub media: MediaUploader,
    pub notifier: Notifier,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Email(#[from] SendEmailError),
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig, media: MediaUploader, notifier: Notifier) -> Self {
        Self {
            auth: Arc::new(Authenticators::from_config(&config.security)),
            hasher: PasswordHasher::new(config.security.bcrypt_cost),
            config: Arc::new(config),
            db,
            media,
            notifier,
        }
    }

    /// Builds the media and email collaborators described by `config`.
    pub fn from_config(db: PgPool, config: AppConfig) -> Result<Self, StateError> {
        let media = MediaUploader::from_config(&config.media)?;
        let notifier = Notifier::from_config(&config.email)?;
        Ok(Self::new(db, config, media, notifier))
    }
}
