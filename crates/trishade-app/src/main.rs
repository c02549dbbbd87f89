mod app;
mod scene;

use trishade_engine::device::GpuInit;
use trishade_engine::logging::{init_logging, LoggingConfig};
use trishade_engine::window::{Runtime, RuntimeConfig};

use crate::app::ShapesApp;

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "trishade".to_string(),
        ..Default::default()
    };

    log::info!("press {} or close the window to quit", app::CLOSE_KEY);

    if let Err(e) = Runtime::run(config, GpuInit::default(), ShapesApp::default()) {
        eprintln!("failed to run trishade: {e:#}");
        std::process::exit(1);
    }
}
