//! NAS Proxy - Entry Point
//!
//! Loads configuration and bootstraps the managed directory layout so the
//! hosting layer can serve tenant operations against it.

use log::{error, info};
use std::process::ExitCode;

use nas_proxy::error::NasError;
use nas_proxy::error::handlers::handle_error;
use nas_proxy::utils::logging::setup_logging;
use nas_proxy::{NasConfig, TenantStorageService};

fn run() -> Result<(), NasError> {
    let config = NasConfig::load()?;
    setup_logging(&config.log_level);

    info!("Bootstrapping NAS root {}", config.root_path);

    let service = TenantStorageService::from_config(&config)?;
    for dir in service.layout().directories() {
        info!("  {}", dir.display());
    }

    info!("NAS layout ready");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(NasError::Config(e)) => {
            // Logging is not configured yet when the config cannot be read
            setup_logging("info");
            error!("Failed to load configuration: {}", e);
            ExitCode::FAILURE
        }
        Err(NasError::Storage(e)) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}
