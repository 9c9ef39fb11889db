//! Account Gateway Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p account-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use account_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_app(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run(config).await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.gateway.address(),
        test_mode = config.app.test_mode,
        database = config.database.is_some(),
        "Starting Account Gateway Server..."
    );

    account_gateway::run(config).await?;

    Ok(())
}
