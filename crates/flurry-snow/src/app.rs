use flurry_engine::coords::Viewport;
use flurry_engine::core::{App, AppControl, FrameCtx};
use flurry_engine::paint::Color;
use flurry_engine::render::shapes::CircleRenderer;
use flurry_engine::scene::DrawList;
use flurry_engine::stage::Stage;

use crate::flake::Flake;

/// Seconds between frame-rate debug lines.
const RATE_LOG_INTERVAL: f32 = 5.0;

/// The falling-snow application.
///
/// Owns the entity stage, the recorded draw stream, and the circle renderer.
/// The stage is populated on the first valid frame — the viewport is unknown
/// until the window exists.
pub struct SnowApp {
    stage: Stage,
    draw_list: DrawList,
    circle_renderer: CircleRenderer,

    flake_count: usize,
    populated: bool,

    backdrop: Color,

    rate_accum: f32,
    rate_frames: u32,
}

impl SnowApp {
    pub fn new(flake_count: usize) -> Self {
        Self {
            stage: Stage::new(),
            draw_list: DrawList::new(),
            circle_renderer: CircleRenderer::new(),
            flake_count,
            populated: false,
            // Night-sky backdrop behind the snow.
            backdrop: Color::from_srgb_u8(0x0b, 0x12, 0x24, 0xff),
            rate_accum: 0.0,
            rate_frames: 0,
        }
    }

    fn populate(&mut self, viewport: Viewport) {
        for _ in 0..self.flake_count {
            let _ = self.stage.insert(Box::new(Flake::new(viewport)));
        }
        log::info!("stage populated with {} flakes", self.stage.len());
    }

    fn log_frame_rate(&mut self, dt: f32) {
        self.rate_accum += dt;
        self.rate_frames += 1;
        if self.rate_accum >= RATE_LOG_INTERVAL {
            log::debug!(
                "{:.1} frames/s over the last {:.1}s",
                self.rate_frames as f32 / self.rate_accum,
                self.rate_accum,
            );
            self.rate_accum = 0.0;
            self.rate_frames = 0;
        }
    }
}

impl App for SnowApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let viewport = Viewport::new(w, h);
        if !viewport.is_valid() {
            // Minimized or mid-resize; try again next tick.
            return AppControl::Continue;
        }

        if !self.populated {
            self.populate(viewport);
            self.populated = true;
        }

        if let Err(e) = self.stage.render_frame(&mut self.draw_list, viewport) {
            log::error!("frame aborted: {e}");
            return AppControl::Exit;
        }

        self.log_frame_rate(ctx.time.dt);

        let circle_renderer = &mut self.circle_renderer;
        let draw_list = &self.draw_list;
        ctx.render(self.backdrop, |rctx, target| {
            circle_renderer.render(rctx, target, draw_list);
        })
    }
}
