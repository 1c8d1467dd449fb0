use axum::{
    extract::{Multipart, Path as AxumPath, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use standard_error::{StandardError, Status};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::resumes::{mutators::ResumeMutator, selectors::ResumeSelector, spec::ResumeEntry},
            ingest::{ingest, UploadedFile},
            merge::{parse_tags, UserSuppliedFields},
            minio::S3Ops,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub tag: Option<String>,
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeEntry>)> {
    let mut resume_file: Option<UploadedFile> = None;
    let mut supplied = UserSuppliedFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-004: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "resume" => {
                let original_filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-005: {}", e)))?;
                resume_file = Some(UploadedFile {
                    data: data.into(),
                    original_filename,
                });
            }
            "name" => {
                supplied.name = Some(read_text(field).await?);
            }
            "email" => {
                supplied.email = Some(read_text(field).await?);
            }
            "phone" => {
                supplied.phone = Some(read_text(field).await?);
            }
            "tags" => {
                supplied.tags = parse_tags(&read_text(field).await?);
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-005: {}", e)))?;
            }
        }
    }

    let upload = resume_file.ok_or_else(|| {
        StandardError::new("ERR-UPLOAD-001: No file uploaded").code(StatusCode::BAD_REQUEST)
    })?;

    let entry = ingest(&state, upload, supplied).await?;
    tracing::info!("ingested resume {} as record {}", &entry.original_filename, entry.id);
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| StandardError::new(&format!("ERR-UPLOAD-005: {}", e)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ResumeEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    // an empty query param means no filter at all
    let search = params.search.as_deref().filter(|s| !s.is_empty());
    let tag = params.tag.as_deref().filter(|t| !t.is_empty());
    let resumes = ResumeSelector::new(&mut tx).list(search, tag).await?;
    Ok(Json(resumes))
}

pub async fn retrieve(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<i32>,
) -> Result<Json<ResumeEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let resume = ResumeSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-RESUME-404: Resume not found").code(StatusCode::NOT_FOUND)
        })?;
    Ok(Json(resume))
}

pub async fn download(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<i32>,
) -> Result<impl IntoResponse> {
    let mut tx = state.db_pool.begin_txn().await?;
    let resume = ResumeSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-RESUME-404: Resume not found").code(StatusCode::NOT_FOUND)
        })?;
    let (file_data, content_type) = state
        .s3_client
        .retrieve_object(&settings.s3_bucket_name, &resume.filename)
        .await?;
    tracing::debug!(
        "retrieved {} of type: {}, size: {} bytes",
        &resume.filename,
        &content_type,
        file_data.len()
    );
    Ok(([(CONTENT_TYPE, content_type)], file_data))
}

pub async fn remove(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let resume = ResumeSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-RESUME-404: Resume not found").code(StatusCode::NOT_FOUND)
        })?;

    // a blob already gone from storage must not block record deletion
    match state
        .s3_client
        .object_exists(&settings.s3_bucket_name, &resume.filename)
        .await
    {
        Ok(true) => {
            if let Err(err) = state
                .s3_client
                .remove_object(&settings.s3_bucket_name, &resume.filename)
                .await
            {
                tracing::warn!("blob cleanup failed for {}: {}", &resume.filename, err);
            }
        }
        Ok(false) => {
            tracing::debug!("blob {} already absent", &resume.filename);
        }
        Err(err) => {
            tracing::warn!("could not stat blob {}: {}", &resume.filename, err);
        }
    }

    ResumeMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    Ok(Json(json!({ "message": "Resume deleted successfully" })))
}

pub async fn tags(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let tags = ResumeSelector::new(&mut tx).distinct_tags().await?;
    Ok(Json(tags))
}
