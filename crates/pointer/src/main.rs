//! Pointer: global hotkey, inline keystroke capture and context broadcast for
//! the desktop assistant.

mod clipboard;
mod config;
mod error;
mod focus_inspector;
mod input_device;
mod listener;
mod logging;
mod remote;
mod server;
mod service;

pub(crate) use {
    clipboard::SystemClipboard,
    error::{AppError, Result as AppResult},
    focus_inspector::PlatformFocusInspector,
    input_device::EnigoInput,
    listener::KeyboardListener,
    remote::HttpRemoteProcessor,
    server::AppState,
    service::PointerService,
};

use crate::config::Config;

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{error, info};

/// Application entry point.
fn main() {
    let log_dir = match Config::log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve log directory: {}", e);
            std::process::exit(1);
        }
    };

    // Held for the process lifetime: dropping it stops the file writer.
    let _log_guard = match logging::init(&log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run() {
        error!(error = ?e, "Pointer exited with error");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let config_path = Config::config_path()?;
    let config = Config::load(&config_path)?;

    let runtime = Runtime::new()?;

    // The listener start waits out its startup window, so it runs before the
    // runtime is entered.
    let service = Arc::new(PointerService::build(&config, runtime.handle())?);
    service.start()?;

    runtime.block_on(async move {
        let listener = server::bind(config.server.port).await?;
        let state = AppState::new(Arc::clone(&service), config, config_path);

        let result = server::serve(listener, state, shutdown_signal()).await;

        service.stop();
        info!("Pointer stopped");

        result
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until the process is killed.
        error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
