use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use brew_catalog::app::BrewCatalog;
use brew_catalog::config::{Cli, Settings};

/// Install the log subscriber; `RUST_LOG` wins over the configured filter
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    let (settings, problem) = Settings::load(Cli::parse());
    init_tracing(&settings.log_filter);

    if let Some(err) = problem {
        warn!(error = %err, "Ignoring settings file");
    }

    iced::application("Brew Catalog", BrewCatalog::update, BrewCatalog::view)
        .theme(BrewCatalog::theme)
        .subscription(BrewCatalog::subscription)
        .centered()
        .run_with(move || BrewCatalog::new(settings.clone()))
}
