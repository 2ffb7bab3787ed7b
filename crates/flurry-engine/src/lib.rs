//! Flurry engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the effect
//! layer: window/event loop, GPU device and surface, draw-stream recording,
//! the entity stage, and shape renderers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod stage;
pub mod render;
