use anyhow::{Context, Result};

use crate::device::{DiagnosticSink, GpuBackend, Session, SessionConfig};
use crate::frame::{FrameDriver, FrameOutcome, FrameStats};
use crate::window::{WindowConfig, WindowProvider};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub session: SessionConfig,
    pub clear_color: wgpu::Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            session: SessionConfig::default(),
            clear_color: wgpu::Color::RED,
        }
    }
}

/// Lifecycle state of an [`Application`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Running,
    /// Terminal.
    CleanedUp,
}

/// Resources that exist between `initialize` and `cleanup`.
struct Live<B: GpuBackend, W> {
    window: W,
    session: Session<B>,
    driver: FrameDriver,
}

/// Owns the window and GPU session and sequences
/// initialize → run* → cleanup.
///
/// The controller does not own the loop; whoever drives it calls `run` once
/// per tick and consults `is_running`.
pub struct Application<B, W>
where
    B: GpuBackend,
    W: WindowProvider<Handle = B::Window>,
{
    backend: B,
    config: AppConfig,
    diagnostics: DiagnosticSink,
    lifecycle: Lifecycle,
    live: Option<Live<B, W>>,
}

impl<B, W> Application<B, W>
where
    B: GpuBackend,
    W: WindowProvider<Handle = B::Window>,
{
    pub fn new(backend: B, config: AppConfig) -> Self {
        Self {
            backend,
            config,
            diagnostics: DiagnosticSink::log(),
            lifecycle: Lifecycle::Uninitialized,
            live: None,
        }
    }

    /// Replaces the sink device-loss and uncaptured-error events go to.
    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Frame counters; zero before initialization.
    pub fn stats(&self) -> FrameStats {
        self.live
            .as_ref()
            .map(|live| live.driver.stats())
            .unwrap_or_default()
    }

    /// Opens the window with `open_window`, then creates the GPU session.
    ///
    /// Any failure is fatal: the error is returned, whatever was created is
    /// released, and the application stays uninitialized.
    pub fn initialize<F>(&mut self, open_window: F) -> Result<()>
    where
        F: FnOnce(&WindowConfig) -> Result<W>,
    {
        anyhow::ensure!(
            self.lifecycle == Lifecycle::Uninitialized,
            "application cannot be initialized from {:?}",
            self.lifecycle
        );

        let window = open_window(&self.config.window).context("failed to create window")?;

        let session = Session::create(
            &self.backend,
            window.handle(),
            self.config.window.size,
            &self.config.session,
            self.diagnostics.clone(),
        )
        .context("failed to create GPU session")?;

        self.live = Some(Live {
            window,
            session,
            driver: FrameDriver::new(self.config.clear_color),
        });
        self.lifecycle = Lifecycle::Initialized;

        log::info!("application initialized");
        Ok(())
    }

    /// Drives one frame.
    pub fn run(&mut self) -> Result<FrameOutcome> {
        let Some(live) = self.live.as_mut() else {
            anyhow::bail!("application cannot run from {:?}", self.lifecycle);
        };

        self.lifecycle = Lifecycle::Running;
        Ok(live.driver.drive(&self.backend, &live.session, &mut live.window))
    }

    /// False once the window received a close request, or when there is no
    /// window at all.
    pub fn is_running(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| !live.window.close_requested())
    }

    /// Releases the GPU session, then destroys the window.
    ///
    /// Only the first call after a successful `initialize` does anything.
    pub fn cleanup(&mut self) {
        let Some(live) = self.live.take() else {
            log::warn!("cleanup ignored in {:?} state", self.lifecycle);
            return;
        };

        let Live {
            window, session, ..
        } = live;

        session.release(&self.backend);
        drop(window);

        self.lifecycle = Lifecycle::CleanedUp;
        log::info!("application cleaned up");
    }
}
