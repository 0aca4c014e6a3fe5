use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("The PDF must have exactly {expected} pages (found {found}).")]
    InvalidPageCount { expected: usize, found: usize },
    #[error("Cannot pair {0} pages onto two-up sheets; the page count must be even")]
    UnpairablePageCount(usize),
    #[error("Source page {0} does not exist")]
    MissingPage(usize),
    #[error("Page content stream could not be decoded: {0}")]
    UndecodableContent(String),
}

impl SheetError {
    /// Whether the error was caused by the page count of the input
    pub fn is_page_count(&self) -> bool {
        matches!(
            self,
            SheetError::NoPages
                | SheetError::InvalidPageCount { .. }
                | SheetError::UnpairablePageCount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Page scaling behavior when a source page doesn't match its half of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Stretch to fill the half exactly (ignore aspect ratio)
    #[default]
    Stretch,
    /// Fit page to the half (preserve aspect ratio), centered
    Fit,
    /// Center without scaling
    None,
}
