// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::records::get_records;
use crate::handlers::summary::{get_summary, SummaryQuery};
use crate::services::store::DatasetStore;

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = invalid.to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<DatasetStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let records_route = warp::path!("api" / "v1" / "records")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_records);

    let summary_route = warp::path!("api" / "v1" / "summary")
        .and(warp::get())
        .and(warp::query::<SummaryQuery>())
        .and(store_filter.clone())
        .and_then(get_summary);

    info!("All routes configured successfully.");

    records_route.or(summary_route).recover(handle_rejection)
}
