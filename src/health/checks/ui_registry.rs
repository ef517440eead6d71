//! UI registry health check

use crate::app::geometry::{Point, Rect};
use crate::app::ui::{ElementKind, ElementProps, UiRegistry};
use crate::health::check::{CheckResult, SystemCheck};

/// Exercises focus traversal and topmost hit-testing
pub struct UiRegistryCheck;

impl UiRegistryCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UiRegistryCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for UiRegistryCheck {
    fn name(&self) -> &'static str {
        "UI Registry"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates focus cycling and layered pointer hit-testing")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut ui = UiRegistry::new();

        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        for (name, layer) in [("a", "base"), ("b", "base"), ("overlay", "top")] {
            let props = ElementProps::builder()
                .rect(rect)
                .focusable(layer == "base")
                .build();
            if let Err(e) = ui.create_element(name, ElementKind::Container, layer, props) {
                return CheckResult::fail(format!("Element creation failed: {e}"));
            }
        }
        details.push(format!("  ✓ {} elements across {} layers", ui.len(), ui.layers().count()));

        ui.focus_next();
        let after_next = ui.focused().map(str::to_string);
        ui.focus_next();
        let wrapped = ui.focused().map(str::to_string);
        if after_next.as_deref() != Some("b") || wrapped.as_deref() != Some("a") {
            details.push(format!("  ✗ Focus went {after_next:?} then {wrapped:?}"));
            return CheckResult::fail("Focus traversal broken").with_details(details.join("\n"));
        }
        details.push("  ✓ Focus cycles with wraparound".to_string());

        let hit = ui.topmost_element_at(Point::new(10.0, 10.0));
        if hit != Some("overlay") {
            details.push(format!("  ✗ Hit-test returned {hit:?}"));
            return CheckResult::fail("Hit-testing broken").with_details(details.join("\n"));
        }
        details.push("  ✓ Topmost layer wins hit-test".to_string());

        CheckResult::pass("UI registry operational").with_details(details.join("\n"))
    }
}
