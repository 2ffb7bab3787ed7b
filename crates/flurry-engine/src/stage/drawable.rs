use std::fmt;

use super::Canvas;

/// Error raised by the drawable contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// An entity claimed drawability without providing a `draw` body.
    ///
    /// This is a programming-contract violation surfaced on first invocation,
    /// not a runtime condition to recover from.
    Unimplemented,
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Unimplemented => write!(f, "draw() is not implemented for this entity"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Contract implemented by every entity participating in the render loop.
///
/// `draw` renders the entity against the shared canvas and may mutate the
/// entity's own state (position updates happen here, after recording).
pub trait Drawable {
    /// Records this entity's draw commands for the current frame.
    ///
    /// The provided default is the abstract base: types that register without
    /// overriding it fail with [`DrawError::Unimplemented`].
    fn draw(&mut self, canvas: &mut Canvas<'_>) -> Result<(), DrawError> {
        let _ = canvas;
        Err(DrawError::Unimplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::scene::DrawList;

    struct Bare;
    impl Drawable for Bare {}

    #[test]
    fn default_draw_is_a_contract_violation() {
        let mut list = DrawList::new();
        let mut canvas = Canvas::new(&mut list, Viewport::new(10.0, 10.0));
        let mut bare = Bare;
        assert_eq!(bare.draw(&mut canvas), Err(DrawError::Unimplemented));
    }

    #[test]
    fn error_is_descriptive() {
        let msg = DrawError::Unimplemented.to_string();
        assert!(msg.contains("not implemented"));
    }
}
