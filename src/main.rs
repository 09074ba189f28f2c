mod assets;
mod components;
mod config;
mod export;
mod menu;
mod search;
mod state;
mod utils;
mod window;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

const VERSION: &str = concat!(
    env!("TRIPAD_BUILD_VERSION"),
    " (",
    compile_time::datetime_str!(),
    ")",
);

/// Tripad: three-pane tabbed notes
#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about,
    long_about = "Tripad: three-pane tabbed notes\n\n\
        Every tab holds three plain-text panes. Tabs are saved to a JSON file\n\
        on quit and restored on the next launch. Settings are read from\n\
        config.json in the platform configuration directory."
)]
struct Cli {}

const DEFAULT_LOGLEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

fn main() {
    // Parse CLI arguments first (handles --help and --version)
    let _cli = Cli::parse();

    init_tracing();

    let config = config::CONFIG.read().clone();
    tracing::debug!(?config, "Loaded configuration");

    let menu = menu::build_menu(config.tray.enabled);
    let desktop_config = window::create_main_window_config(&config).with_menu(menu);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .launch(components::main_app::MainApp);
}

fn init_tracing() {
    let silence_filter = tracing_subscriber::filter::filter_fn(|metadata| {
        // Filter out specific error from dioxus_core::properties:136
        // Known issue: https://github.com/DioxusLabs/dioxus/issues/3872
        metadata.target() != "dioxus_core::properties::__component_called_as_function"
    });

    let env_filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGLEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(silence_filter.clone());

    let registry = tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(fmt_layer);

    // On macOS, also log to Console.app via oslog
    #[cfg(target_os = "macos")]
    let registry = registry.with(
        tracing_oslog::OsLogger::new("io.github.tripad", "default").with_filter(silence_filter),
    );

    registry.init();
}
