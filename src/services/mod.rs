pub mod media;
pub mod notifier;

pub use media::{MediaError, MediaKind, MediaUploader, ObjectStore, UploadBatch};
pub use notifier::{Mailer, Notifier, SendEmailError};
