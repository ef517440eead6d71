//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (package, rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let details: Vec<String> = build_info::detailed_info()
            .lines()
            .map(|line| format!("  {line}"))
            .collect();

        if build_info::BUILD_TIMESTAMP.is_empty() || build_info::RUSTC_SEMVER.is_empty() {
            return CheckResult::warn("Build metadata incomplete").with_details(details.join("\n"));
        }

        CheckResult::pass(build_info::banner()).with_details(details.join("\n"))
    }
}
