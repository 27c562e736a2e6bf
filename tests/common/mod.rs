//! Shared fixtures for the integration specs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use milestone_overview::github::{Direction, MilestoneSort, Tracker};
use milestone_overview::models::*;
use milestone_overview::{Error, Result};
use reqwest::StatusCode;

pub fn milestone(number: u64, title: &str, due: Option<&str>) -> Milestone {
    Milestone {
        number,
        title: title.to_string(),
        description: None,
        state: MilestoneState::Open,
        due_on: due.map(|d| d.parse().expect("valid RFC 3339 date")),
        open_issues: 0,
        closed_issues: 0,
        html_url: None,
    }
}

pub fn issue(number: u64, title: &str, milestone: u64) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: String::new(),
        state: "open".to_string(),
        labels: Vec::new(),
        milestone: Some(MilestoneRef { number: milestone }),
        html_url: None,
        pull_request: None,
    }
}

pub fn labelled(mut issue: Issue, labels: &[&str]) -> Issue {
    issue.labels = labels
        .iter()
        .map(|name| Label {
            name: name.to_string(),
            color: None,
        })
        .collect();
    issue
}

/// In-memory tracker that records which milestones had their issues fetched.
#[derive(Default)]
pub struct FakeTracker {
    milestones: Vec<Milestone>,
    issues: HashMap<u64, Vec<Issue>>,
    fail_issues_for: Option<u64>,
    milestone_calls: AtomicUsize,
    issue_calls: Mutex<Vec<u64>>,
}

impl FakeTracker {
    pub fn new(milestones: Vec<Milestone>) -> Self {
        Self {
            milestones,
            ..Default::default()
        }
    }

    pub fn with_issues(mut self, milestone: u64, issues: Vec<Issue>) -> Self {
        self.issues.insert(milestone, issues);
        self
    }

    pub fn failing_issues_for(mut self, milestone: u64) -> Self {
        self.fail_issues_for = Some(milestone);
        self
    }

    pub fn milestone_calls(&self) -> usize {
        self.milestone_calls.load(Ordering::SeqCst)
    }

    pub fn issue_calls(&self) -> Vec<u64> {
        self.issue_calls.lock().expect("lock poisoned").clone()
    }

    /// The standard two-milestone scenario: one with a due date, one without.
    pub fn release_and_backlog() -> Self {
        Self::new(vec![
            milestone(1, "v1.0", Some("2024-01-01T00:00:00Z")),
            milestone(2, "Backlog", None),
        ])
        .with_issues(
            1,
            vec![
                labelled(issue(10, "Crash on start", 1), &["bug"]),
                labelled(issue(11, "Add dark mode", 1), &["enhancement"]),
            ],
        )
        .with_issues(2, vec![issue(20, "Someday", 2)])
    }
}

impl Tracker for FakeTracker {
    async fn fetch_milestones(
        &self,
        _repo: &str,
        _sort: MilestoneSort,
        _direction: Direction,
    ) -> Result<Vec<Milestone>> {
        self.milestone_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.milestones.clone())
    }

    async fn fetch_issues(&self, repo: &str, milestone: u64) -> Result<Vec<Issue>> {
        self.issue_calls
            .lock()
            .expect("lock poisoned")
            .push(milestone);
        if self.fail_issues_for == Some(milestone) {
            return Err(Error::Status {
                url: format!("/repos/{}/issues?milestone={}", repo, milestone),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            });
        }
        Ok(self.issues.get(&milestone).cloned().unwrap_or_default())
    }
}
