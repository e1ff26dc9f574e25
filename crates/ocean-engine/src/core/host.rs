use anyhow::Result;

use crate::device::GpuBackend;
use crate::window::WindowProvider;

use super::app::Application;

/// Native host loop: drives frames until the window asks to close.
///
/// Does not call `cleanup`; the caller decides when teardown happens.
pub fn run_blocking<B, W>(app: &mut Application<B, W>) -> Result<()>
where
    B: GpuBackend,
    W: WindowProvider<Handle = B::Window>,
{
    while app.is_running() {
        app.run()?;
    }

    let stats = app.stats();
    log::info!(
        "host loop finished: {} frames presented, {} skipped",
        stats.presented,
        stats.skipped
    );
    Ok(())
}
