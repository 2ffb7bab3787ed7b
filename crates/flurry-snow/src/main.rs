//! Falling-snow effect binary.
//!
//! Thin bootstrap: initialize logging, size the window to the monitor, hand
//! the stage-owning app to the runtime.

mod app;
mod flake;

use flurry_engine::device::GpuInit;
use flurry_engine::logging::{init_logging, LoggingConfig};
use flurry_engine::window::{Runtime, RuntimeConfig};

use app::SnowApp;

/// Number of flakes registered at startup.
const FLAKE_COUNT: usize = 100;

fn main() {
    init_logging(LoggingConfig::default());
    log::info!("flurry {} starting", env!("CARGO_PKG_VERSION"));

    let config = RuntimeConfig {
        title: "flurry".to_string(),
        // Monitor-sized window; the runtime falls back to 300x300 when no
        // monitor resolves.
        initial_size: None,
    };

    if let Err(e) = Runtime::run(config, GpuInit::default(), SnowApp::new(FLAKE_COUNT)) {
        eprintln!("flurry runtime error: {e:#}");
        std::process::exit(1);
    }
}
