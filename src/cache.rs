//! Time-based cache in front of the refresh pipeline.
//!
//! A single mutex guards the cached page and its timestamp. It is held for the
//! whole read-or-refresh, so refreshes never overlap and no caller sees a
//! buffer from a refresh that has not finished. Callers arriving during a
//! refresh wait for it.

use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::Result;

/// Something that can produce a fresh page.
pub trait Generate: Send + Sync {
    fn generate(&self) -> impl Future<Output = Result<Bytes>> + Send;
}

#[derive(Debug, Default)]
struct CacheState {
    data: Bytes,
    updated: Option<Instant>,
}

impl CacheState {
    fn is_stale(&self, lifetime: Duration, now: Instant) -> bool {
        match self.updated {
            Some(updated) => now.duration_since(updated) > lifetime,
            None => true,
        }
    }
}

pub struct OverviewCache<G> {
    generator: G,
    lifetime: Duration,
    state: Mutex<CacheState>,
}

impl<G: Generate> OverviewCache<G> {
    /// Create an empty cache; the first [`get`](Self::get) refreshes.
    pub fn new(generator: G, lifetime: Duration) -> Self {
        Self {
            generator,
            lifetime,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Return the cached page, regenerating it first if it is older than the
    /// configured lifetime or has never been generated.
    ///
    /// On error the previous page and timestamp are left untouched.
    pub async fn get(&self) -> Result<Bytes> {
        let mut state = self.state.lock().await;

        if state.is_stale(self.lifetime, Instant::now()) {
            tracing::info!(age = ?state.updated.map(|t| t.elapsed()), "cache stale, refreshing");
            let data = self.generator.generate().await?;
            state.data = data;
            state.updated = Some(Instant::now());
        }

        Ok(state.data.clone())
    }
}
