use anyhow::{Context, Result};
use pdf_sheets::ImposeOptions;
use pdf_sheets_server::{AppState, ConsoleLogger, ServerConfig, app};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    ConsoleLogger::new(config.log_level).init()?;

    let options = match &config.options_path {
        Some(path) => ImposeOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ImposeOptions::default(),
    };
    log::info!(
        "Pairing: {}, required pages: {:?}, scaling: {:?}",
        options.pairing,
        options.required_pages,
        options.scaling
    );
    match &config.debug_output {
        Some(path) => log::info!("Conversions are copied to {}", path.display()),
        None => log::info!("Debug copy disabled"),
    }

    let state = AppState::new(options, config.sink());
    let router = app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;
    log::info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, router).await?;
    Ok(())
}
