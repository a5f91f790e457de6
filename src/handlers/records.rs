// src/handlers/records.rs
use log::info;
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::store::DatasetStore;

/// Full working dataset plus the min/max dates the frontend clamps its
/// date picker to. Called once per page load.
pub async fn get_records(store: Arc<DatasetStore>) -> Result<Json, Rejection> {
    info!("Handling request for the working dataset");

    Ok(warp::reply::json(&json!({
        "records": store.records(),
        "bounds": store.bounds(),
    })))
}
