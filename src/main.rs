mod app;
mod client;
mod config;
mod constants;
mod error;
mod types;

use std::error::Error as StdError;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use clap::Parser;
use constants::*;
use eframe::{NativeOptions, run_native};
use eframe::egui::{Vec2, ViewportBuilder};
use app::{spawn_load, App, FireAndForget, PickerOptions};
use client::{ColorEndpoint, HttpColorClient};
use config::Config;

/// Color picker for an LED strip server.
#[derive(clap::Parser, Debug)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Server base URL, e.g. http://ledpi.local:5000
    #[arg(long)]
    server: Option<String>,

    /// Log requests at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn StdError>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => Config::load_file(path)?,
        None => Config::default(),
    };
    if let Some(server) = args.server {
        config.server = server;
    }

    let options = PickerOptions::from_config(&config.picker)?;
    let client = HttpColorClient::from_config(&config);
    log::info!("using {}", client.server());

    let endpoint: Arc<dyn ColorEndpoint> = Arc::new(client);
    let loader = spawn_load(Arc::clone(&endpoint));
    let dispatcher = Rc::new(FireAndForget::new(endpoint)?);

    let width = options.width + GUI_SIDEBAR_WIDTH + GUI_PANEL_PADDING * 2.0;
    let height = options.height + GUI_SWATCH_HEIGHT + GUI_PANEL_PADDING * 4.0;

    let native = NativeOptions {
        viewport: ViewportBuilder {
            inner_size: Some(Vec2::new(width, height)),
            resizable: Some(false),
            maximize_button: Some(false),
            ..Default::default()
        },
        ..Default::default()
    };

    let app = App::new(options, config.server.clone(), loader, dispatcher);
    run_native(
        "Strip Color",
        native,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}
