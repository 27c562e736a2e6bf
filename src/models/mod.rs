//! Domain models for the overview page.
//!
//! [`Milestone`] and [`Issue`] mirror the tracker's JSON. They are rebuilt on
//! every refresh and never persisted.
//!
//! [`AggregatedMilestone`] is what the page template sees: one milestone with
//! the issues that belong to it.

mod issue;
mod milestone;

pub use issue::*;
pub use milestone::*;

use serde::{Deserialize, Serialize};

/// A milestone together with its issues, sorted by title.
///
/// Every issue's `milestone.number` equals `milestone.number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedMilestone {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub issues: Vec<Issue>,
}
