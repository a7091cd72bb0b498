//! Purchase Predict - HTTP inference service for purchase-transaction
//! classification
//!
//! This binary loads the model, vocabulary, and label artifacts, then
//! serves the prediction endpoint until shutdown.

use purchase_predict::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServiceConfig::load()?;

    // Start server
    purchase_predict::start_server(config).await?;

    Ok(())
}
