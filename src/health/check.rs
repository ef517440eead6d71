//! Core health check trait and types

use std::fmt;
use std::time::Duration;

use colored::Colorize;

/// Status of a system check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    Pass,
    /// Usable, but something looks off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        match self {
            CheckStatus::Pass => self.as_str().green().to_string(),
            CheckStatus::Warn => self.as_str().yellow().to_string(),
            CheckStatus::Fail => self.as_str().red().to_string(),
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// Brief message describing the result
    pub message: String,
    /// Optional multi-line detail, one observation per line
    pub details: Option<String>,
    /// How long the check took, filled in by the runner
    pub duration: Duration,
}

impl CheckResult {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    /// Perform the health check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering_ranks_failures_last() {
        let worst = [CheckStatus::Warn, CheckStatus::Pass, CheckStatus::Fail]
            .into_iter()
            .max();
        assert_eq!(worst, Some(CheckStatus::Fail));
        assert!(CheckStatus::Warn.is_ok());
        assert!(!CheckStatus::Fail.is_ok());
    }

    #[test]
    fn test_result_builders() {
        let result = CheckResult::warn("slow")
            .with_details("  ⚠ took a while")
            .with_duration(Duration::from_millis(5));

        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.status.to_string(), "WARN");
        assert_eq!(result.details.as_deref(), Some("  ⚠ took a while"));
        assert_eq!(result.duration, Duration::from_millis(5));
    }
}
