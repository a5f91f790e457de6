use anyhow::Context;
use dotenv::dotenv;
use log::{error, info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use cpa_dashboard_srg::routes;
use cpa_dashboard_srg::services::dataset::{CsvProvider, DatasetProvider, StaticProvider};
use cpa_dashboard_srg::services::store::DatasetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    // Get port from the environment, default to 3030
    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().context("PORT must be a number")?;
    info!("Using PORT: {}", port);

    // CPA_DATA_CSV swaps the built-in sample dataset for a flat file
    let provider: Box<dyn DatasetProvider> = match env::var("CPA_DATA_CSV") {
        Ok(path) => {
            info!("Using CSV dataset provider: {}", path);
            Box::new(CsvProvider::new(path))
        }
        Err(_) => {
            info!("CPA_DATA_CSV not set, using the built-in sample dataset");
            Box::new(StaticProvider)
        }
    };

    // Load once at startup; the store stays immutable from here on
    let store = match DatasetStore::from_provider(provider.as_ref()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to load the dataset: {}", e);
            return Err(e.into());
        }
    };

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    // Set up routes
    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;

    Ok(())
}
