mod ui;

use gtk4::glib;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use flipmatch::GameConfig;

const TEXT_DOMAIN: &str = "flipmatch";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn init_gettext() {
    gettextrs::setlocale(gettextrs::LocaleCategory::LcAll, "");
    if let Err(err) = gettextrs::textdomain(TEXT_DOMAIN) {
        tracing::warn!(error = %err, "failed to select text domain");
    }
}

fn main() -> glib::ExitCode {
    init_tracing();
    init_gettext();

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid config, using defaults");
            GameConfig::default()
        }
    };
    tracing::info!(
        levels = ?(config.min_level..=config.max_level()),
        "starting"
    );

    ui::app::run(config)
}
