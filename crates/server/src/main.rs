//! Forecast server binary.

use server::{logging, ServerConfig};

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    logging::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = server::run(config).await {
        tracing::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
