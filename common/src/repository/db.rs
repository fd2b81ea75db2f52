use crate::config::DatabaseConfig;
use anyhow::{Result, anyhow};
use log::info;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Opens the MongoDB database named in the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let client_options = ClientOptions::parse(&config.url).await.map_err(|e| anyhow!("MongoDB URI parse error: {}", e))?;
    let client = Client::with_options(client_options).map_err(|e| anyhow!("MongoDB client init error: {}", e))?;
    info!("connected to MongoDB database {}", config.db_name);
    Ok(client.database(&config.db_name))
}
