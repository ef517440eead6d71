//! Window configuration and management

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use super::config::WindowConfig;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_follow_config() {
        let config = WindowConfig {
            title: "Launcher".to_string(),
            resizable: false,
            ..WindowConfig::default()
        };

        let attrs = window_attributes_from_config(&config);

        assert_eq!(attrs.title, "Launcher");
        assert!(!attrs.resizable);
        assert!(attrs.decorations);
    }
}
