//! Test runner for orchestrating health checks

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    /// Individual check results with their system names, in run order
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    fn record(&mut self, name: String, result: CheckResult) {
        match result.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warn => self.warned += 1,
            CheckStatus::Fail => self.failed += 1,
        }
        self.total += 1;
        self.results.push((name, result));
    }

    /// Returns true if all checks passed (no failures)
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Names of the systems that failed
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|(_, result)| result.status.is_fail())
            .map(|(name, _)| name.as_str())
    }

    /// Returns the appropriate exit code for this report
    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport::default();

        for check in self.checks {
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            if result.status.is_fail() {
                warn!(check = check.name(), message = %result.message, "Health check failed");
            } else {
                debug!(check = check.name(), status = %result.status, "Health check finished");
            }
            report.record(check.name().to_string(), result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("broken"),
            }
        }
    }

    #[test]
    fn test_counts_and_exit_codes() {
        let healthy = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .run();
        assert_eq!(healthy.exit_code(), 0);

        let warned = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert!(warned.is_healthy());
        assert_eq!(warned.exit_code(), 2);

        let failed = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Warn))
            .add_check(Fixed("b", CheckStatus::Fail))
            .run();
        assert_eq!(failed.total, 2);
        assert_eq!(failed.exit_code(), 1);
        assert_eq!(failed.failures().collect::<Vec<_>>(), vec!["b"]);
    }
}
