//! HTTP route handlers

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use pdf_sheets::constants::OUTPUT_FILE_NAME;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::AppState;

/// Multipart field carrying the PDF
pub const UPLOAD_FIELD: &str = "pdfFile";

struct Upload {
    file_name: String,
    data: Bytes,
}

/// `POST /convert`: impose the uploaded PDF and return it as an attachment.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ConvertError> {
    let upload = read_upload(multipart).await?;
    log::info!(
        "Uploaded file: {} ({} bytes)",
        upload.file_name,
        upload.data.len()
    );

    let pdf = Bytes::from(pdf_sheets::convert_bytes(upload.data.to_vec(), &state.options).await?);
    log::info!("Final PDF byte length: {}", pdf.len());

    persist(&state, pdf.clone()).await;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{OUTPUT_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Find the `pdfFile` field; anything else in the form is ignored.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Upload, ConvertError> {
    let mut multipart = multipart.map_err(|e| {
        log::debug!("Request is not a multipart upload: {}", e);
        ConvertError::NoFileProvided
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ConvertError::Upload {
                    status: e.status(),
                    message: e.body_text(),
                });
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field.bytes().await.map_err(|e| ConvertError::Upload {
            status: e.status(),
            message: e.body_text(),
        })?;

        // An empty file input still submits the field
        if data.is_empty() {
            break;
        }
        return Ok(Upload { file_name, data });
    }

    log::info!("No file uploaded");
    Err(ConvertError::NoFileProvided)
}

async fn persist(state: &AppState, pdf: Bytes) {
    let sink = Arc::clone(&state.sink);
    match tokio::task::spawn_blocking(move || sink.persist(&pdf)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("Failed to persist converted PDF: {}", e),
        Err(e) => log::warn!("Persist task failed: {}", e),
    }
}
