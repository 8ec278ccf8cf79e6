//! Upload encoding: a local document → request body.
//!
//! The two API versions disagree on how a file travels. v7 takes a
//! `multipart/form-data` body with the raw bytes in a `file` part; v8 takes
//! JSON with the bytes base64-encoded in `file_data`. Both start by reading
//! the whole file, since Veryfi needs the complete document anyway.

use crate::error::VeryfiError;
use crate::transport::canonical::CanonicalMap;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

/// Read a document from disk.
pub async fn read_file(path: &Path) -> Result<Vec<u8>, VeryfiError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| VeryfiError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a document and encode it as standard base64.
pub async fn base64_encode_file(path: impl AsRef<Path>) -> Result<String, VeryfiError> {
    let bytes = read_file(path.as_ref()).await?;
    let b64 = STANDARD.encode(&bytes);
    debug!(
        "Encoded {} → {} bytes base64",
        path.as_ref().display(),
        b64.len()
    );
    Ok(b64)
}

/// File name to report to Veryfi: the explicit one, else the path's last
/// component.
pub fn upload_file_name(explicit: &str, path: &Path) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// A file plus its form fields, kept in memory so the multipart body can be
/// rebuilt for every retry attempt.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub fields: CanonicalMap,
}

impl MultipartUpload {
    /// Assemble a fresh form: one text part per field, then the `file` part.
    pub fn to_form(&self) -> Form {
        let form = self
            .fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()));
        form.part(
            "file",
            Part::bytes(self.bytes.clone()).file_name(self.file_name.clone()),
        )
    }
}
