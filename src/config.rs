//! Command line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::github::DEFAULT_API_URL;
use crate::overview::MilestoneFilter;

#[derive(Debug, Clone, Parser)]
#[command(name = "milestone-overview")]
#[command(about = "Serve an HTML overview of a repository's milestones and issues")]
#[command(version)]
pub struct Config {
    /// Repository name
    #[arg(long, default_value = "syncthing/syncthing")]
    pub repo: String,

    /// Listen address
    #[arg(long, default_value = ":8080")]
    pub listen: String,

    /// Cache life time
    #[arg(long, default_value = "1h", value_parser = parse_duration)]
    pub cache: Duration,

    /// Include milestones with a due date
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    pub due: bool,

    /// Include milestones without a due date
    #[arg(long, default_value_t = false, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    pub nondue: bool,

    /// Issue tracker API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory of *.html.hbs templates to use instead of the built-in page
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

impl Config {
    pub fn filter(&self) -> MilestoneFilter {
        MilestoneFilter {
            include_due: self.due,
            include_non_due: self.nondue,
        }
    }

    /// The address to bind. An empty host (`:8080`) means all interfaces.
    pub fn listen_addr(&self) -> String {
        match self.listen.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None => self.listen.clone(),
        }
    }
}

/// Parse a duration such as `1h`, `90s`, `1h30m` or `1.5m`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let input = s.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut rest = input;
    let mut nanos = 0f64;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(format!("invalid duration {:?}", input));
        }
        let value: f64 = rest[..num_end]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", input))?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration {:?}", input)),
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, input)),
        };
        nanos += value * scale;
        rest = &rest[unit_end..];
    }

    Ok(Duration::from_nanos(nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["milestone-overview"]);
        assert_eq!(config.repo, "syncthing/syncthing");
        assert_eq!(config.listen, ":8080");
        assert_eq!(config.cache, Duration::from_secs(3600));
        assert_eq!(config.filter(), MilestoneFilter::default());
        assert!(config.templates.is_none());
    }

    #[test]
    fn boolean_flags_take_values() {
        let config = Config::parse_from(["milestone-overview", "--due=false", "--nondue"]);
        assert!(!config.due);
        assert!(config.nondue);

        let config = Config::parse_from(["milestone-overview", "--due", "false"]);
        assert!(!config.due);
    }

    #[test]
    fn listen_addr_fills_in_empty_host() {
        let config = Config::parse_from(["milestone-overview"]);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");

        let config = Config::parse_from(["milestone-overview", "--listen", "127.0.0.1:9000"]);
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("90s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("1.5m"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("h").is_err());
    }
}
