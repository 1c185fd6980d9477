use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use bytes::Bytes;

use crate::error::ApiError;

/// A file part held in memory until it is validated and uploaded.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A fully buffered `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(upload_failed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await.map_err(upload_failed)?;
                    // An empty file input still sends a part with no name and no bytes.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(upload_failed)?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn owned(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|v| v.trim().to_string())
    }

    /// Numeric identifier field. Blank counts as absent; anything else must parse.
    pub fn id(&self, name: &str) -> Result<Option<i64>, ApiError> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("Invalid {}", name))),
        }
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

fn upload_failed(err: axum::extract::multipart::MultipartError) -> ApiError {
    tracing::warn!("Multipart read failed: {}", err);
    ApiError::bad_request(format!("File upload failed: {}", err.body_text()))
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("File upload failed: {}", e.body_text())))?;
        Self::read(multipart).await
    }
}

#[cfg(test)]
impl FormData {
    pub fn from_parts(
        fields: impl IntoIterator<Item = (&'static str, &'static str)>,
        files: impl IntoIterator<Item = (&'static str, UploadedFile)>,
    ) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            files: files.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}
