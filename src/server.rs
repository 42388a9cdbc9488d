//! Server initialization and startup logic for brandkit.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use brandkit_api::{ApiConfig, ApiServer, AppState};
use brandkit_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, ValidationResult};

/// Initialize tracing with console output and, when a log directory is
/// configured, daily-rotated files.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = match logging.log_dir() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("brandkit")
                .filename_suffix("log")
                .max_log_files(14)
                .build(&log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The worker flushes only while its guard is alive
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Load the configuration file (or defaults), apply environment overrides and
/// resolve relative directories against `work_dir`.
///
/// Returns whether the file existed.
pub(crate) fn load_config(
    path: &Path,
    work_dir: &Path,
) -> Result<(Config, bool), Box<dyn std::error::Error>> {
    let (mut config, found) = ConfigLoader::load_or_default(path)?;
    ConfigLoader::apply_env_overrides(&mut config)?;
    Ok((config.with_base_dir(work_dir), found))
}

fn report(validation: &ValidationResult) {
    for warning in &validation.warnings {
        warn!("Config warning: {}", warning);
    }
    for err in &validation.errors {
        error!("Config error: {}", err);
    }
}

/// Run the server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(&config);
    report(&validation);
    if !validation.is_valid() {
        return Err(format!(
            "invalid configuration ({} error(s))",
            validation.errors.len()
        )
        .into());
    }

    info!("Starting brandkit v{}", env!("CARGO_PKG_VERSION"));
    info!("Scripts directory: {}", config.scripts.dir.display());
    info!("Uploads directory: {}", config.uploads.dir.display());

    let state = AppState::from_config(&config);
    for script in state.catalog.missing() {
        warn!(
            "{} script not found at {}",
            state.catalog.file_name(script),
            state.catalog.path(script).display()
        );
    }

    let server = ApiServer::new(
        ApiConfig::new(config.server.host.clone(), config.server.port),
        Arc::new(state),
    );
    info!("Listening on {}", server.addr());
    server.run().await
}

/// Validate the configuration and print the resolved settings as JSON.
pub(crate) fn check_config(config: &Config, path: &Path, found: bool) -> Result<(), Box<dyn std::error::Error>> {
    if found {
        println!("Configuration: {}", path.display());
    } else {
        println!("Configuration: {} (not found, using defaults)", path.display());
    }
    println!("{}", serde_json::to_string_pretty(config)?);

    let validation = ConfigValidator::validate(config);
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    for err in &validation.errors {
        println!("error: {}", err);
    }

    if validation.is_valid() {
        println!("Configuration is valid");
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", validation.errors.len()).into())
    }
}
