use std::process::ExitCode;

use ocean_engine::core::{run_blocking, AppConfig, Application};
use ocean_engine::device::WgpuBackend;
use ocean_engine::logging::{init_logging, LoggingConfig};
use ocean_engine::window::NativeWindow;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let backend: WgpuBackend = WgpuBackend::default();
    let mut app = Application::new(backend, AppConfig::default());

    if let Err(err) = app.initialize(NativeWindow::open) {
        log::error!("initialization failed: {err:#}");
        return ExitCode::FAILURE;
    }

    let result = run_blocking(&mut app);
    app.cleanup();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
