//! Image uploads written to local disk and served back as static files.

use std::{io, path::PathBuf};

use salvo::{http::form::FilePart, prelude::StatusError};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Route prefix the upload directory is served under.
pub(crate) const UPLOADS_ROUTE: &str = "public/uploads";

/// Most files accepted by a gallery upload.
pub(crate) const MAX_GALLERY_IMAGES: usize = 10;

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    #[error("file type is not an accepted image type")]
    UnsupportedType,

    #[error("failed to store upload: {0}")]
    Io(#[from] io::Error),
}

impl From<UploadError> for StatusError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::UnsupportedType => {
                StatusError::bad_request().brief("Only png and jpeg images are accepted")
            }
            UploadError::Io(source) => {
                error!("failed to store upload: {source}");

                StatusError::internal_server_error()
            }
        }
    }
}

/// Where uploaded files go and how they are addressed publicly.
#[derive(Debug, Clone)]
pub(crate) struct UploadStore {
    dir: PathBuf,
    public_base_url: String,
}

impl UploadStore {
    #[must_use]
    pub(crate) fn new(dir: PathBuf, public_base_url: &str) -> Self {
        Self {
            dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Copy an uploaded part into the store and return its public URL.
    pub(crate) async fn save(&self, field: &str, part: &FilePart) -> Result<String, UploadError> {
        let extension = part
            .content_type()
            .and_then(|mime| image_extension(mime.essence_str()))
            .ok_or(UploadError::UnsupportedType)?;

        let file_name = stored_file_name(field, Uuid::now_v7(), extension);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::copy(part.path(), self.dir.join(&file_name)).await?;

        Ok(self.public_url(&file_name))
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{UPLOADS_ROUTE}/{file_name}", self.public_base_url)
    }
}

/// File extension for an accepted image content type.
fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpeg"),
        "image/jpg" => Some("jpg"),
        _ => None,
    }
}

fn stored_file_name(field: &str, uuid: Uuid, extension: &str) -> String {
    format!("{field}-{}.{extension}", uuid.simple())
}
