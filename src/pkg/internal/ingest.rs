use std::path::Path;

use axum::http::StatusCode;
use standard_error::{StandardError, Status};
use uuid::Uuid;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::resumes::{
                mutators::{CreateResumeData, ResumeMutator},
                spec::ResumeEntry,
            },
            extract::{extract_document, FileKind},
            merge::{merge, UserSuppliedFields},
            minio::S3Ops,
            recognize::recognize,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// One inbound upload, as received at the transport boundary.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub original_filename: String,
}

impl UploadedFile {
    pub fn extension(&self) -> String {
        Path::new(&self.original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

/// Rejects anything that is not a pdf/docx at most 10 MiB, before any
/// decode work happens.
pub fn validate(upload: &UploadedFile) -> Result<FileKind> {
    let kind = FileKind::from_extension(&upload.extension()).ok_or_else(|| {
        StandardError::new("ERR-UPLOAD-002: Invalid file type. Only PDF and DOCX files are allowed")
            .code(StatusCode::BAD_REQUEST)
    })?;
    if upload.data.len() > MAX_UPLOAD_BYTES {
        return Err(
            StandardError::new("ERR-UPLOAD-003: File too large. Maximum size is 10MB")
                .code(StatusCode::BAD_REQUEST),
        );
    }
    Ok(kind)
}

/// Collision-resistant object key, keeping the original name and declared
/// extension visible.
pub fn stored_filename(original_filename: &str, kind: FileKind) -> String {
    format!("{}-{}.{}", original_filename, Uuid::new_v4(), kind.extension())
}

/// Runs one upload through the full pipeline: validate, extract text,
/// recognize contact fields, merge with the caller's overrides, store the
/// blob, then persist the record. The blob goes to storage before the
/// record exists; if the record write fails the blob is removed again so
/// a failed ingestion leaves nothing behind.
pub async fn ingest(
    state: &AppState,
    upload: UploadedFile,
    supplied: UserSuppliedFields,
) -> Result<ResumeEntry> {
    let kind = validate(&upload)?;
    let text = extract_document(&upload.data, kind)?;
    tracing::debug!(
        "extracted {} chars from {}",
        text.len(),
        &upload.original_filename
    );

    let recognized = recognize(&text);
    let fields = merge(&recognized, &supplied);

    let filename = stored_filename(&upload.original_filename, kind);
    state
        .s3_client
        .upload_object(
            &settings.s3_bucket_name,
            &filename,
            upload.data,
            kind.mime_type(),
        )
        .await?;

    let record = CreateResumeData {
        name: fields.name,
        email: fields.email,
        phone: Some(fields.phone).filter(|p| !p.is_empty()),
        tags: supplied.tags,
        filename: filename.clone(),
        original_filename: upload.original_filename,
        file_type: format!(".{}", kind.extension()),
    };

    let created = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = ResumeMutator::new(&mut tx).create(record).await?;
        tx.commit().await?;
        Ok::<ResumeEntry, StandardError>(entry)
    }
    .await;

    match created {
        Ok(entry) => Ok(entry),
        Err(err) => {
            // the blob was stored first; do not leave it orphaned
            if let Err(cleanup) = state
                .s3_client
                .remove_object(&settings.s3_bucket_name, &filename)
                .await
            {
                tracing::warn!("orphaned blob {} left behind: {}", &filename, cleanup);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, size: usize) -> UploadedFile {
        UploadedFile {
            data: vec![0u8; size],
            original_filename: name.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_supported_extensions() -> Result<()> {
        assert_eq!(validate(&upload("cv.pdf", 10))?, FileKind::Pdf);
        assert_eq!(validate(&upload("cv.DOCX", 10))?, FileKind::Docx);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_unknown_extensions() {
        assert!(validate(&upload("cv.txt", 10)).is_err());
        assert!(validate(&upload("cv.doc", 10)).is_err());
        assert!(validate(&upload("cv", 10)).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_files() {
        assert!(validate(&upload("cv.pdf", MAX_UPLOAD_BYTES + 1)).is_err());
        assert!(validate(&upload("cv.pdf", MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn test_stored_filename_is_unique_and_keeps_extension() {
        let a = stored_filename("cv.pdf", FileKind::Pdf);
        let b = stored_filename("cv.pdf", FileKind::Pdf);
        assert_ne!(a, b);
        assert!(a.starts_with("cv.pdf-"));
        assert!(a.ends_with(".pdf"));
    }
}
