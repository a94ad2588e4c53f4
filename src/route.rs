//! Route definitions for the gallery API
//!
//! This module configures the HTTP routes and maps them to their handlers.

use axum::routing::get;
use axum::Router;

use crate::database::AppState;
use crate::handler::list_gallery;

/// Creates the Axum application router
///
/// # Route Definitions
///
/// - `GET /api/notion` - Filtered, searched, paginated gallery items
///
/// # Example Usage
///
/// ```no_run
/// # use gallery::config::Config;
/// # use gallery::database::AppState;
/// # use gallery::notion::NotionClient;
/// # use gallery::route::create_app;
/// # let config = Config::from_env().unwrap();
/// let client = NotionClient::new(&config.notion).unwrap();
/// let app = create_app(AppState::new(client));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/notion", get(list_gallery))
        .with_state(state)
}
