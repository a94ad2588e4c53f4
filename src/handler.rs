//! HTTP request handlers for the gallery API
//!
//! This module wires the query pipeline to Axum:
//! - Reading and sanitizing the query string
//! - Draining the upstream Notion query
//! - Turning any failure into the degraded 200 envelope

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use crate::database::{category_filter, fetch_all, AppState};
use crate::error::Result;
use crate::gallery::build_response;
use crate::model::{GalleryParams, GalleryResponse};

/// Lists gallery items with filtering, search and pagination
///
/// # Query Parameters
///
/// - `page` (optional) - Page number, starts from 1 (default: 1)
/// - `limit` (optional) - Items per page (default: 12)
/// - `category` (optional) - Only records whose `Category` contains this text;
///   empty or `All` disables the filter
/// - `search` (optional) - Case-insensitive match on title, description,
///   category and author
///
/// Invalid or non-positive `page`/`limit` values fall back to the defaults,
/// and a repeated key keeps its first value.
///
/// # Example Request
///
/// `GET /api/notion?page=2&limit=12&category=Marketing&search=launch`
///
/// # Response
///
/// Always **200 OK**. On failure the body has empty `data` and `categories`,
/// zeroed pagination and an `error` message:
///
/// ```json
/// {
///   "data": [],
///   "pagination": { "currentPage": 1, "totalPages": 0, "totalItems": 0,
///                   "itemsPerPage": 12, "hasNextPage": false, "hasPrevPage": false },
///   "categories": [],
///   "error": "API token is invalid."
/// }
/// ```
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = GalleryParams::from_pairs(pairs);

    let response = match query_gallery(&state, &params).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Notion API error");
            GalleryResponse::failed(e.to_string())
        }
    };

    Json(response)
}

/// Runs one gallery query end to end
///
/// Any error discards everything fetched so far.
pub async fn query_gallery(state: &AppState, params: &GalleryParams) -> Result<GalleryResponse> {
    let filter = params.category_filter().map(category_filter);
    let records = fetch_all(state.source.as_ref(), filter, state.max_pages).await?;

    let response = build_response(&records, params, state.stats.as_ref());

    info!(
        fetched = records.len(),
        matched = response.pagination.total_items,
        page = response.pagination.current_page,
        "served gallery query"
    );

    Ok(response)
}
