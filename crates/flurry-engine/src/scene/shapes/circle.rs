use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self { center, radius, color }
    }
}

impl DrawList {
    /// Records a solid filled circle.
    #[inline]
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::Circle(CircleCmd::new(center, radius, color)));
    }
}
