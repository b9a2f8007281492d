//! Image attachment encoding
//!
//! Converts user-selected image files into the inline base64 payloads the
//! generateContent API expects. The same encoded form doubles as a
//! `data:` URI for preview-style display.

use crate::ai::mime;
use crate::{Error, Result};
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// A base64-encoded image ready for inline transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: String,
}

impl ImageAttachment {
    /// Encode raw image bytes. The MIME type is detected from the magic
    /// bytes, never from a file name.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mime_type = mime::detect_image_mime(bytes)?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);

        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }

    /// Read and encode one image file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Read image file {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    /// Read and encode several image files concurrently. Each file is
    /// encoded independently; results keep the input order.
    pub async fn load_all(paths: &[PathBuf]) -> Result<Vec<Self>> {
        let handles: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| tokio::spawn(async move { Self::load(&path).await }))
            .collect();

        let mut attachments = Vec::with_capacity(handles.len());
        for handle in handles {
            let attachment = handle
                .await
                .map_err(|e| Error::Generic(format!("Image encoding task failed: {}", e)))??;
            attachments.push(attachment);
        }

        Ok(attachments)
    }

    /// Render as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
