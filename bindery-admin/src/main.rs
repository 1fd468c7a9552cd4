use bindery_admin::app::{self, AppConfig, Cli};

use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("bindery_admin", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
        log::debug!("Initialized logger from env");
    }

    let cli = Cli::parse();
    let config = AppConfig::from_environment().with_cli(&cli);
    log::debug!(
        "Server {} (offline: {})",
        config.server_url(),
        config.use_test_stubs()
    );

    app::run(cli, config).await
}
