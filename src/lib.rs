//! Hearth
//!
//! The interaction core of a small retained-mode application framework:
//! raw device events become rebindable actions, one-shot callbacks and
//! focus/pointer routing over layered interface elements.

/// Input routing, UI registry and the interaction context
pub mod app;

/// Build-time information (timestamp, target, compiler)
pub mod build_info;

/// Startup health checks
pub mod health;
