//! Milestone overview: fetches a repository's milestones and issues from the
//! GitHub API, renders them into a single HTML page and serves that page from
//! a time-based cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod overview;

pub use error::{Error, ErrorKind, Result};
