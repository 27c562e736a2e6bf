//! Access to the issue tracker.
//!
//! [`Tracker`] is the seam the aggregator pulls through; [`GithubClient`] is
//! the HTTP implementation used in production.

mod client;

pub use client::*;

use std::future::Future;

use crate::error::Result;
use crate::models::{Issue, Milestone};

/// Field the tracker orders milestones by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneSort {
    DueDate,
}

impl MilestoneSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
        }
    }
}

/// Read access to a repository's milestones and issues.
///
/// Implementations do not retry; any failure is returned to the caller.
pub trait Tracker: Send + Sync {
    fn fetch_milestones(
        &self,
        repo: &str,
        sort: MilestoneSort,
        direction: Direction,
    ) -> impl Future<Output = Result<Vec<Milestone>>> + Send;

    /// Issues assigned to the given milestone.
    fn fetch_issues(
        &self,
        repo: &str,
        milestone: u64,
    ) -> impl Future<Output = Result<Vec<Issue>>> + Send;
}
