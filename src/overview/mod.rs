//! The refresh pipeline: fetch, aggregate, render.

mod aggregate;
mod render;

pub use aggregate::*;
pub use render::*;

use std::time::Instant;

use axum::body::Bytes;

use crate::cache::Generate;
use crate::error::Result;
use crate::github::Tracker;

/// Produces the overview page for one repository.
pub struct Overview<T> {
    tracker: T,
    repo: String,
    filter: MilestoneFilter,
    renderer: Renderer,
}

impl<T: Tracker> Overview<T> {
    pub fn new(
        tracker: T,
        repo: impl Into<String>,
        filter: MilestoneFilter,
        renderer: Renderer,
    ) -> Self {
        Self {
            tracker,
            repo: repo.into(),
            filter,
            renderer,
        }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }
}

impl<T: Tracker> Generate for Overview<T> {
    /// Run the full pipeline once. Nothing is returned unless every step
    /// succeeds.
    async fn generate(&self) -> Result<Bytes> {
        let started = Instant::now();
        let milestones = aggregate(&self.tracker, &self.repo, self.filter).await?;
        let page = self.renderer.render(&self.repo, &milestones)?;
        tracing::info!(
            repo = %self.repo,
            milestones = milestones.len(),
            bytes = page.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated overview"
        );
        Ok(Bytes::from(page))
    }
}
