mod handlers;

use std::sync::Arc;

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

use crate::cache::{Generate, OverviewCache};

pub use handlers::HTML_CONTENT_TYPE;

/// Build the router. Every method on every path serves the overview page.
pub fn create_router<G>(cache: Arc<OverviewCache<G>>) -> Router
where
    G: Generate + 'static,
{
    Router::new()
        .route("/", any(handlers::overview::<G>))
        .fallback(handlers::overview::<G>)
        .layer(TraceLayer::new_for_http())
        .with_state(cache)
}
