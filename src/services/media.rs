use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{MediaBackend, MediaConfig};
use crate::middleware::form::UploadedFile;
use crate::validation::image::detect_mime;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("invalid object key: {0}")]
    InvalidKey(String),
}

/// What an uploaded image belongs to; decides its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Admin,
    Club,
    Manager,
    Player,
    FootballNews,
    Match,
}

impl MediaKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Admin => "adminImages",
            MediaKind::Club => "clubImages",
            MediaKind::Manager => "managerImages",
            MediaKind::Player => "playerImages",
            MediaKind::FootballNews => "footballNewsImages",
            MediaKind::Match => "matchImages",
        }
    }
}

/// Put/delete of whole objects plus the URL clients fetch them from.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), MediaError>;
    async fn delete(&self, key: &str) -> Result<(), MediaError>;
    fn public_url(&self, key: &str) -> String;
}

/// Writes objects below a directory that the API serves under `/uploads`.
pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(key);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(MediaError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<(), MediaError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaError::UploadFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let path = self.path_for(key)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| MediaError::DeleteFailed(e.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

/// Object gateway reached with bearer-authenticated PUT/DELETE requests on
/// `{endpoint}/{bucket}/{key}`.
///
/// No SigV4 signing happens here; S3 or MinIO must sit behind a gateway that
/// accepts the token.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    public_base_url: Option<String>,
    access_token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| MediaError::UploadFailed("MEDIA_ENDPOINT not set".into()))?;
        let bucket = config
            .bucket
            .clone()
            .ok_or_else(|| MediaError::UploadFailed("MEDIA_BUCKET not set".into()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
            public_base_url: Some(config.public_base_url.clone()).filter(|u| !u.is_empty()),
            access_token: config.access_token.clone(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), MediaError> {
        let request = self
            .client
            .put(self.object_url(key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaError::UploadFailed(format!("storage answered {}", response.status())));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let request = self.client.delete(self.object_url(key));
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| MediaError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MediaError::DeleteFailed(format!("storage answered {}", response.status())));
        }
        Ok(())
    }

    /// `MEDIA_PUBLIC_BASE_URL/key` when set, otherwise the object URL itself.
    fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => self.object_url(key),
        }
    }
}

/// An object that has been written and may have to be taken back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct MediaUploader {
    store: Arc<dyn ObjectStore>,
}

impl MediaUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        let store: Arc<dyn ObjectStore> = match config.backend {
            MediaBackend::Local => Arc::new(LocalStore::new(&config.root, &config.public_base_url)),
            MediaBackend::Http => Arc::new(HttpObjectStore::new(config)?),
        };
        Ok(Self::new(store))
    }

    pub async fn store(&self, kind: MediaKind, file: &UploadedFile) -> Result<StoredMedia, MediaError> {
        let key = object_key(kind, &file.file_name);
        let content_type = detect_mime(file).unwrap_or("application/octet-stream");

        self.store.put(&key, file.bytes.clone(), content_type).await?;
        tracing::debug!(key = %key, size = file.bytes.len(), "media stored");

        Ok(StoredMedia {
            url: self.store.public_url(&key),
            key,
        })
    }

    /// Best-effort removal; failures are logged and otherwise ignored.
    pub async fn discard(&self, media: &[StoredMedia]) {
        let deletions = media.iter().map(|m| async move {
            if let Err(e) = self.store.delete(&m.key).await {
                tracing::error!(key = %m.key, "failed to roll back uploaded media: {}", e);
            } else {
                tracing::info!(key = %m.key, "rolled back uploaded media");
            }
        });
        futures::future::join_all(deletions).await;
    }

    pub fn batch(&self) -> UploadBatch {
        UploadBatch {
            uploader: self.clone(),
            stored: Vec::new(),
        }
    }
}

/// Uploads made while handling one request, so they can be rolled back together.
pub struct UploadBatch {
    uploader: MediaUploader,
    stored: Vec<StoredMedia>,
}

impl UploadBatch {
    /// Stores the file and returns its public URL.
    pub async fn put(&mut self, kind: MediaKind, file: &UploadedFile) -> Result<String, MediaError> {
        let media = self.uploader.store(kind, file).await?;
        let url = media.url.clone();
        self.stored.push(media);
        Ok(url)
    }

    pub async fn rollback(&mut self) {
        let stored = std::mem::take(&mut self.stored);
        if !stored.is_empty() {
            self.uploader.discard(&stored).await;
        }
    }

    /// Passes `outcome` through, undoing this batch's uploads when it is an error.
    pub async fn commit_or_rollback<T, E>(&mut self, outcome: Result<T, E>) -> Result<T, E> {
        if outcome.is_err() {
            self.rollback().await;
        }
        outcome
    }
}

/// `<prefix>/<millis>-<nonce>-<sanitized file name>`.
pub fn object_key(kind: MediaKind, file_name: &str) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}-{}-{}",
        kind.prefix(),
        Utc::now().timestamp_millis(),
        &nonce[..8],
        sanitize_file_name(file_name)
    )
}

fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
