use anyhow::Result;
use utm_tracker::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: no .env file loaded ({e})");
    }

    let config = config::load_from_env()?;
    logging::init(&config.log_level, &config.log_format);
    config.print_summary();

    server::run(config).await
}
