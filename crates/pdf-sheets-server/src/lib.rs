//! HTTP front end for two-up sheet imposition.
//!
//! `POST /convert` takes a multipart upload (field `pdfFile`) and answers with
//! the imposed PDF; every other path is served from the static directory.

pub mod config;
mod error;
pub mod logger;
pub mod routes;
pub mod sink;

pub use config::{ConfigError, ServerConfig};
pub use error::ConvertError;
pub use logger::ConsoleLogger;
pub use sink::{FileSink, NoopSink, OutputSink};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use pdf_sheets::ImposeOptions;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Shared by every request; read-only apart from the sink
pub struct AppState {
    pub options: ImposeOptions,
    pub sink: Arc<dyn OutputSink>,
}

impl AppState {
    pub fn new(options: ImposeOptions, sink: Arc<dyn OutputSink>) -> Self {
        Self { options, sink }
    }
}

/// Build the application router
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/convert", post(routes::convert))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(Arc::new(state))
}
