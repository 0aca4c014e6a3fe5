use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pdf_sheets::SheetError;
use thiserror::Error;

/// Why a conversion request produced no PDF
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No PDF file uploaded.")]
    NoFileProvided,
    /// The upload itself could not be read (truncated body, size limit, ...)
    #[error("{message}")]
    Upload { status: StatusCode, message: String },
    /// Page count check failed; the message names the expected and actual count
    #[error("{0}")]
    InvalidPageCount(SheetError),
    #[error("An error occurred during conversion.")]
    ConversionFailure(#[source] SheetError),
}

impl ConvertError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::NoFileProvided | ConvertError::InvalidPageCount(_) => {
                StatusCode::BAD_REQUEST
            }
            ConvertError::Upload { status, .. } => *status,
            ConvertError::ConversionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SheetError> for ConvertError {
    fn from(err: SheetError) -> Self {
        if err.is_page_count() {
            ConvertError::InvalidPageCount(err)
        } else {
            ConvertError::ConversionFailure(err)
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        match &self {
            // Internal detail goes to the log only
            ConvertError::ConversionFailure(err) => {
                log::error!("Error during PDF conversion: {}", err)
            }
            other => log::warn!("Rejected conversion: {}", other),
        }

        (self.status(), self.to_string()).into_response()
    }
}
