use super::DrawCmd;

/// Recorded draw stream for a frame.
///
/// Commands are replayed by renderers in the order they were pushed; the
/// effect's paint order is its recording order, so no sorting happens here.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - `clear()` keeps allocated capacity, so a warmed list allocates nothing
///   per frame
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a draw command.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn circle(radius: f32) -> DrawCmd {
        DrawCmd::Circle(crate::scene::CircleCmd::new(
            Vec2::zero(),
            radius,
            Color::from_srgb_u8(255, 255, 255, 255),
        ))
    }

    #[test]
    fn push_preserves_recording_order() {
        let mut list = DrawList::new();
        list.push(circle(1.0));
        list.push(circle(2.0));
        list.push(circle(3.0));

        let radii: Vec<f32> = list
            .items()
            .iter()
            .map(|DrawCmd::Circle(c)| c.radius)
            .collect();
        assert_eq!(radii, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn clear_empties_the_stream() {
        let mut list = DrawList::new();
        list.push(circle(1.0));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
