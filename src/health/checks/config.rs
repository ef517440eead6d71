//! Configuration system health check

use crate::app::input::{Callback, CallbackId};
use crate::app::{AppConfig, InteractionContext};
use crate::health::check::{CheckResult, SystemCheck};

/// Loads each profile and applies its startup scene to a scratch context
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

enum ProfileOutcome {
    Ready(String),
    Empty(String),
    Broken(String),
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }

    fn check_profile(profile: &str) -> ProfileOutcome {
        let config = match AppConfig::load(profile) {
            Ok(config) => config,
            Err(e) => return ProfileOutcome::Broken(format!("  ✗ {profile}: {e}")),
        };
        let scene = config.scene();
        if scene.input.is_empty() && scene.ui.is_empty() {
            return ProfileOutcome::Empty(format!("  ⚠ {profile}: no startup scene"));
        }

        // Host callbacks are stubbed; only ids and structure are validated here
        let mut ctx = InteractionContext::new();
        ctx.register_navigation_callbacks();
        let referenced: Vec<CallbackId> = scene
            .input
            .bind
            .iter()
            .map(|spec| spec.callback.clone())
            .chain(scene.ui.elements.values().filter_map(|spec| spec.callback.clone()))
            .collect();
        for id in referenced {
            if ctx.callbacks().get(&id).is_none() {
                ctx.register_callback(Callback::new(id, || Ok(())));
            }
        }

        match ctx.load_scene(&scene) {
            Ok(()) => ProfileOutcome::Ready(format!(
                "  ✓ {profile}: {}x{} window, {} bindings, {} actions, {} elements",
                config.window.width,
                config.window.height,
                scene.input.bind.len(),
                scene.input.map.len(),
                scene.ui.elements.len()
            )),
            Err(e) => ProfileOutcome::Broken(format!("  ✗ {profile}: scene rejected - {e}")),
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile and applies its startup scene")
    }

    fn check(&self) -> CheckResult {
        let mut lines = Vec::with_capacity(self.profiles.len() + 1);
        let mut broken = 0;
        let mut empty = 0;

        for profile in &self.profiles {
            match Self::check_profile(profile) {
                ProfileOutcome::Ready(line) => lines.push(line),
                ProfileOutcome::Empty(line) => {
                    empty += 1;
                    lines.push(line);
                }
                ProfileOutcome::Broken(line) => {
                    broken += 1;
                    lines.push(line);
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => lines.push(format!("  ✓ APP_PROFILE resolves to '{}'", config.profile)),
            Err(e) => {
                empty += 1;
                lines.push(format!("  ⚠ APP_PROFILE: {e}"));
            }
        }

        let details = lines.join("\n");
        if broken > 0 {
            CheckResult::fail(format!("{broken} of {} profiles unusable", self.profiles.len())).with_details(details)
        } else if empty > 0 {
            CheckResult::warn("Profiles loaded with warnings").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles ready", self.profiles.len())).with_details(details)
        }
    }
}
