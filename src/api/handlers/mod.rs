use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::cache::{Generate, OverviewCache};
use crate::error::Error;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serve the cached overview page, refreshing it first when stale.
///
/// A failed refresh is not turned into an error response: it is logged and
/// the process exits, leaving restarts to the supervisor.
pub async fn overview<G: Generate>(
    State(cache): State<Arc<OverviewCache<G>>>,
) -> impl IntoResponse {
    match cache.get().await {
        Ok(page) => ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], page),
        Err(e) => fatal(&e),
    }
}

fn fatal(e: &Error) -> ! {
    tracing::error!(error = %e, kind = ?e.kind(), "refreshing overview failed, exiting");
    std::process::exit(1)
}
