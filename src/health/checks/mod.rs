//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod input_router;
pub mod ui_registry;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use input_router::InputRouterCheck;
pub use ui_registry::UiRegistryCheck;
