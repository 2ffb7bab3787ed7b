use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

/// Recording surface handed to entities during a frame.
///
/// Wraps the frame's cleared draw stream together with the current viewport,
/// so entities can both issue drawing commands and read the surface bounds
/// they move within. Entities reference the canvas, never own it.
pub struct Canvas<'a> {
    list: &'a mut DrawList,
    viewport: Viewport,
}

impl<'a> Canvas<'a> {
    #[inline]
    pub fn new(list: &'a mut DrawList, viewport: Viewport) -> Self {
        Self { list, viewport }
    }

    /// Current surface bounds in logical pixels.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records a solid filled circle.
    #[inline]
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.list.push_circle(center, radius, color);
    }
}
