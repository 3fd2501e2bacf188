use clap::Parser;
use config_engine::ConfigValidator;
use std::path::PathBuf;
use tracing::info;

use error_common::{log_error, ErCareError, Result};
use ercare_server::{create_app, ErCareServer, ServerSettings};
use logger_redacted::LogFormat;

/// ERCare Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "ercare-server")]
#[command(about = "Emergency department triage HTTP API server")]
struct Args {
    /// Server bind address (overrides configuration)
    #[arg(long, env = "ERCARE_HOST")]
    host: Option<String>,

    /// Server port (overrides configuration)
    #[arg(short, long, env = "ERCARE_PORT")]
    port: Option<u16>,

    /// Configuration file path (YAML or TOML); skipped when missing
    #[arg(short, long, env = "ERCARE_CONFIG", default_value = "ercare-server.yaml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings =
        ServerSettings::load(&args.config).map_err(|e| ErCareError::ConfigError(e.to_string()))?;
    let settings = apply_overrides(settings, &args)?;

    logger_redacted::init(&settings.logging).map_err(|e| ErCareError::ConfigError(e.to_string()))?;

    if let Err(err) = run(settings).await {
        log_error("ercare-server", &err);
        return Err(err);
    }
    Ok(())
}

/// Apply command line overrides, then re-check the result
fn apply_overrides(mut settings: ServerSettings, args: &Args) -> Result<ServerSettings> {
    if let Some(host) = &args.host {
        settings.host.clone_from(host);
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if args.verbose {
        settings.logging.log_level = "ercare_server=debug,triage_engine=debug,tower_http=debug,info".to_string();
    }
    if args.json_logs {
        settings.logging.format = LogFormat::Json;
    }
    settings
        .validate()
        .map_err(|e| ErCareError::ValidationError(e.to_string()))?;
    Ok(settings)
}

async fn run(settings: ServerSettings) -> Result<()> {
    let addr = settings.bind_address();

    info!("Starting ERCare Engine HTTP Server");
    info!(version = env!("CARGO_PKG_VERSION"), "Version");
    info!(bind_address = %addr, log_format = %settings.logging.format, "Configuration loaded");

    let server = ErCareServer::new(settings);
    info!(rules = server.classifier.rules().len(), "Triage protocol loaded");

    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ErCareError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("ERCare Engine server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);
    info!("API v1 available at: http://{}/api/v1", addr);
    info!("API documentation at: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ErCareError::ServerError(format!("HTTP server error: {}", e)))?;

    info!("ERCare Engine server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ercare_server::settings::JwtSettings;

    fn loaded() -> ServerSettings {
        ServerSettings {
            jwt: JwtSettings {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                issuer: None,
            },
            ..ServerSettings::default()
        }
    }

    #[test]
    fn test_overrides_are_applied() {
        let args = Args::parse_from(["ercare-server", "--host", "127.0.0.1", "--port", "9200", "--json-logs"]);
        let settings = apply_overrides(loaded(), &args).unwrap();
        assert_eq!(settings.bind_address(), "127.0.0.1:9200");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args::parse_from(["ercare-server", "--port", "0"]);
        let err = apply_overrides(loaded(), &args).unwrap_err();
        assert_eq!(err.error_type(), "validation_error");
        assert!(err.to_string().contains("port"));
    }
}
