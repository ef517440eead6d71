//! Startup self-tests for the interaction core
//!
//! Each check exercises one subsystem in isolation, which makes the suite
//! useful both at startup (`launcher --check`) and in CI.
//!
//! ```no_run
//! use hearth::health::{HealthCheckRunner, checks::{InputRouterCheck, UiRegistryCheck}};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(InputRouterCheck::new())
//!     .add_check(UiRegistryCheck::new())
//!     .run();
//!
//! for name in report.failures() {
//!     eprintln!("{name} is broken");
//! }
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_details, format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Configuration, input router, UI registry and build info, in that order
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::InputRouterCheck::new())
        .add_check(checks::UiRegistryCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .run()
}
