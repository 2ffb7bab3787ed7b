//! Paint model shared between the effect layer and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//!
//! Geometry types remain in `coords`. Every fill in this engine is a solid
//! color; draw commands carry a `Color` directly.

mod color;

pub use color::Color;
