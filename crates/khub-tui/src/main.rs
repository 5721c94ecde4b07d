mod backend;
mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use khub_core::models::Hub;
use khub_core::tracing_setup::{init_tracing, log_file_from_env};
use khub_core::{ClientConfig, HttpHubApi};
use tokio::sync::mpsc;
use tracing::info;

use crate::backend::{Backend, BackendEvent};
use crate::runtime::run_app;
use crate::ui::App;

/// Terminal client for a local knowledge hub backend.
#[derive(Parser, Debug)]
#[command(name = "khub", version, about)]
struct Cli {
    /// Backend base URL (overrides KHUB_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Open this hub's chat directly
    #[arg(long, value_name = "NAME")]
    hub: Option<String>,

    /// Write logs to this file (overrides KHUB_LOG_FILE)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(log_file_from_env(cli.log_file.as_deref()).as_deref())?;
    let config = ClientConfig::resolve(cli.api_url.as_deref())?;
    info!(base_url = %config.base_url, "starting khub");

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::restore_terminal();
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let mut app = App::new(config.base_url.clone());
    let api = Arc::new(HttpHubApi::new(config));
    let (event_tx, event_rx) = mpsc::channel::<BackendEvent>(32);
    let backend = Backend::new(api, event_tx);

    match cli.hub {
        Some(name) => app.open_hub(Hub::new(name)),
        None => backend.dispatch(app.activate_hubs()),
    }

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &backend, event_rx).await;
    ui::restore_terminal()?;

    result
}
