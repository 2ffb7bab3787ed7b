use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Surface size used when no monitor can be resolved for the default.
const FALLBACK_SIZE: LogicalSize<f64> = LogicalSize::new(300.0, 300.0);

/// Window/runtime configuration.
///
/// `initial_size: None` sizes the window to the primary monitor's logical
/// dimensions (falling back to 300×300 when no monitor resolves).
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: Option<LogicalSize<f64>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "flurry".to_string(),
            initial_size: None,
        }
    }
}

/// Entry point for the runtime.
///
/// Drives the frame loop: every `about_to_wait` tick requests a redraw, so
/// the application renders once per display refresh for the lifetime of the
/// window. There is no explicit stop operation; the loop ends when the
/// window closes or the app returns [`AppControl::Exit`].
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RunState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // Startup failures exit the loop cleanly from winit's point of view;
        // surface them to the caller so no partial runtime is reported as ok.
        match state.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct RunState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    clock: FrameClock,

    startup_error: Option<anyhow::Error>,
}

impl<A> RunState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            gpu: None,
            clock: FrameClock::new(),
            startup_error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = self
            .config
            .initial_size
            .unwrap_or_else(|| default_size(event_loop));

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone()))
            .context("failed to initialize GPU surface")?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.clock.reset();
        Ok(())
    }
}

fn default_size(event_loop: &ActiveEventLoop) -> LogicalSize<f64> {
    event_loop
        .primary_monitor()
        .map(|m| m.size().to_logical(m.scale_factor()))
        .unwrap_or(FALLBACK_SIZE)
}

impl<A> ApplicationHandler for RunState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_window(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one request per tick, forever.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(gpu), Some(window)) = (self.gpu.as_mut(), self.window.as_ref()) {
                    gpu.resize(window.inner_size());
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(gpu), Some(window)) = (self.gpu.as_mut(), self.window.as_ref()) else {
                    return;
                };

                let time = self.clock.tick();
                let mut ctx = FrameCtx {
                    window: WindowCtx { window },
                    gpu,
                    time,
                };

                if self.app.on_frame(&mut ctx) == AppControl::Exit {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
