use flurry_engine::coords::{Vec2, Viewport};
use flurry_engine::paint::Color;
use flurry_engine::stage::{Canvas, DrawError, Drawable};

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Direction the flake is currently sweeping through its oscillation band.
///
/// `Positive` moves left, `Negative` moves right; the direction flips at the
/// band boundaries (`median ± frequency`), not at the center.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Sway {
    Positive,
    Negative,
}

/// A single snow flake.
///
/// Owns its position, motion parameters, and appearance, plus the random
/// source its respawns draw from. All randomized attributes are fixed for
/// the fall and re-rolled only when the flake exits the bottom edge.
pub struct Flake {
    pos: Vec2,
    radius: f32,
    frequency: f32,
    speed: f32,
    fall_speed: f32,
    sway: Sway,
    median: f32,
    color: Color,

    rng: Box<dyn RngCore>,
}

impl Flake {
    /// Creates a flake with entropy-seeded randomness.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rng(Box::new(SmallRng::from_rng(&mut rand::rng())), viewport)
    }

    /// Creates a flake drawing all random attributes from `rng`.
    ///
    /// This is the seam tests use to make spawns deterministic.
    pub fn with_rng(rng: Box<dyn RngCore>, viewport: Viewport) -> Self {
        let mut flake = Self {
            pos: Vec2::zero(),
            radius: 0.0,
            frequency: 0.0,
            speed: 0.0,
            fall_speed: 0.0,
            sway: Sway::Positive,
            median: 0.0,
            color: Color::transparent(),
            rng,
        };
        flake.respawn(viewport);
        flake
    }

    /// Re-rolls every randomized attribute and moves the flake back to the
    /// top edge at a new random column.
    fn respawn(&mut self, viewport: Viewport) {
        self.pos.x = viewport.width * self.rng.random::<f32>();
        self.pos.y = 0.0;
        self.radius = (40.0 * self.rng.random::<f32>()).max(11.0);
        self.frequency = (12.0 * self.rng.random::<f32>()).max(2.0);
        self.speed = self.frequency * 0.1;
        self.fall_speed = (8.0 * self.rng.random::<f32>()).max(2.0);
        self.sway = Sway::Positive;
        self.median = self.pos.x;
        self.color = random_color(self.rng.as_mut());
    }

    /// Advances the sweep and the fall by one frame, respawning when the
    /// flake reaches the bottom edge.
    fn step(&mut self, viewport: Viewport) {
        if self.pos.x > self.median + self.frequency {
            self.pos.x -= self.speed;
            self.sway = Sway::Positive;
        } else if self.pos.x < self.median - self.frequency {
            self.pos.x += self.speed;
            self.sway = Sway::Negative;
        } else {
            self.pos.x = match self.sway {
                Sway::Positive => self.pos.x - self.speed,
                Sway::Negative => self.pos.x + self.speed,
            };
        }

        self.pos.y += self.fall_speed;

        if self.pos.y >= viewport.height {
            self.respawn(viewport);
        }
    }
}

impl Drawable for Flake {
    fn draw(&mut self, canvas: &mut Canvas<'_>) -> Result<(), DrawError> {
        canvas.fill_circle(self.pos, self.radius, self.color);

        // Off-center highlight suggesting a light source up and to the left.
        let highlight_offset = Vec2::new(-0.42 * self.radius, -0.35 * self.radius);
        canvas.fill_circle(
            self.pos + highlight_offset,
            self.radius * 0.15,
            highlight_color(),
        );

        self.step(canvas.viewport());
        Ok(())
    }
}

/// Translucent white of the body highlight (`#ffffff6f`).
fn highlight_color() -> Color {
    Color::from_srgb_u8(0xff, 0xff, 0xff, 0x6f)
}

/// Pseudo-random opaque fill color.
///
/// Each channel is drawn independently as `ceil(255·u)`; a zero channel
/// requires drawing exactly 0, so fully dark channels are vanishingly rare.
fn random_color(rng: &mut dyn RngCore) -> Color {
    let r = (255.0 * rng.random::<f32>()).ceil() as u8;
    let g = (255.0 * rng.random::<f32>()).ceil() as u8;
    let b = (255.0 * rng.random::<f32>()).ceil() as u8;
    Color::from_srgb_u8(r, g, b, 0xff)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Random source that yields 0 for every draw.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    const VIEWPORT: Viewport = Viewport::new(300.0, 300.0);

    fn zero_flake() -> Flake {
        Flake::with_rng(Box::new(ZeroRng), VIEWPORT)
    }

    fn seeded_flake(seed: u64) -> Flake {
        Flake::with_rng(Box::new(SmallRng::seed_from_u64(seed)), VIEWPORT)
    }

    // ── spawn ─────────────────────────────────────────────────────────────

    #[test]
    fn zero_random_spawn_sits_at_the_lower_bounds() {
        let flake = zero_flake();
        assert_eq!(flake.pos.x, 0.0);
        assert_eq!(flake.pos.y, 0.0);
        assert_eq!(flake.radius, 11.0);
        assert_eq!(flake.frequency, 2.0);
        assert_eq!(flake.speed, 0.2);
        assert_eq!(flake.fall_speed, 2.0);
        assert_eq!(flake.median, 0.0);
        assert_eq!(flake.sway, Sway::Positive);
    }

    #[test]
    fn respawn_enforces_lower_bounds_and_pins_median() {
        let mut flake = seeded_flake(42);
        for _ in 0..100 {
            flake.respawn(VIEWPORT);
            assert!(flake.radius >= 11.0);
            assert!(flake.frequency >= 2.0);
            assert!(flake.fall_speed >= 2.0);
            assert_eq!(flake.speed, flake.frequency * 0.1);
            assert_eq!(flake.pos.y, 0.0);
            assert_eq!(flake.median, flake.pos.x);
            assert_eq!(flake.sway, Sway::Positive);
            assert!(flake.pos.x >= 0.0 && flake.pos.x < VIEWPORT.width);
        }
    }

    #[test]
    fn random_color_is_opaque() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let c = random_color(&mut rng);
            assert_eq!(c.a, 1.0);
            assert!(c.is_finite());
        }
    }

    // ── stepping ──────────────────────────────────────────────────────────

    #[test]
    fn first_step_falls_and_sweeps_left() {
        let mut flake = zero_flake();
        flake.step(VIEWPORT);
        // x = 0 is inside the band, so the current Positive phase moves left.
        assert_eq!(flake.pos.x, -0.2);
        assert_eq!(flake.pos.y, 2.0);
    }

    #[test]
    fn y_grows_monotonically_until_the_bottom_edge_respawns() {
        let mut flake = zero_flake();

        // 149 steps of fall_speed 2 reach y = 298 without a respawn.
        let mut prev_y = flake.pos.y;
        for _ in 0..149 {
            flake.step(VIEWPORT);
            assert!(flake.pos.y > prev_y);
            prev_y = flake.pos.y;
        }
        assert_eq!(flake.pos.y, 298.0);

        // Step 150 would land on y = 300 = height: exactly one respawn.
        flake.step(VIEWPORT);
        assert_eq!(flake.pos.y, 0.0);
        assert_eq!(flake.median, flake.pos.x);
    }

    #[test]
    fn sweep_stays_inside_the_band_and_median_is_stable() {
        let mut flake = zero_flake();
        let lo = flake.median - flake.frequency - flake.speed;
        let hi = flake.median + flake.frequency + flake.speed;

        // Stay short of the bottom edge so no respawn re-rolls the band.
        for _ in 0..149 {
            flake.step(VIEWPORT);
            assert!(flake.pos.x >= lo - 1e-3, "x ran past the left bound");
            assert!(flake.pos.x <= hi + 1e-3, "x ran past the right bound");
            assert_eq!(flake.median, 0.0);
        }
    }

    #[test]
    fn sweep_reverses_at_both_boundaries() {
        let mut flake = zero_flake();

        // Drive left until the flake crosses median - frequency.
        let tall = Viewport::new(300.0, f32::INFINITY);
        while flake.sway == Sway::Positive {
            flake.step(tall);
        }
        assert!(flake.pos.x < flake.median - flake.frequency + flake.speed + 1e-3);

        // And back right until it crosses median + frequency.
        while flake.sway == Sway::Negative {
            flake.step(tall);
        }
        assert!(flake.pos.x > flake.median + flake.frequency - flake.speed - 1e-3);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_records_body_then_highlight() {
        use flurry_engine::scene::{DrawCmd, DrawList};

        let mut flake = zero_flake();
        let mut list = DrawList::new();
        let mut canvas = Canvas::new(&mut list, VIEWPORT);
        flake.draw(&mut canvas).unwrap();

        let items = list.items();
        assert_eq!(items.len(), 2);

        let DrawCmd::Circle(body) = &items[0];
        assert_eq!(body.center, Vec2::new(0.0, 0.0));
        assert_eq!(body.radius, 11.0);

        let DrawCmd::Circle(highlight) = &items[1];
        assert_eq!(highlight.radius, 11.0 * 0.15);
        assert_eq!(
            highlight.center,
            Vec2::new(-0.42 * 11.0, -0.35 * 11.0)
        );
        // Translucent white, premultiplied.
        let (r, g, b, a) = highlight.color.to_straight();
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 1.0).abs() < 1e-6);
        assert!((b - 1.0).abs() < 1e-6);
        assert!((a - 0x6f as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn draw_advances_state_after_recording() {
        use flurry_engine::scene::DrawList;

        let mut flake = zero_flake();
        let mut list = DrawList::new();
        let mut canvas = Canvas::new(&mut list, VIEWPORT);
        flake.draw(&mut canvas).unwrap();

        // The recorded circle is at the pre-step position; the flake has
        // already moved for the next frame.
        assert_eq!(flake.pos.y, 2.0);
        assert_eq!(flake.pos.x, -0.2);
    }
}
