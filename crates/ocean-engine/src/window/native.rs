use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::{WindowConfig, WindowProvider};

/// `winit` window driven by pumping the event loop from the caller's loop.
///
/// Fields drop in order: the window goes before its event loop.
pub struct NativeWindow {
    handler: Handler,
    window: Arc<Window>,
    event_loop: EventLoop<()>,
}

struct Handler {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    create_error: Option<anyhow::Error>,
    close_requested: bool,
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                self.create_error = Some(anyhow::anyhow!("failed to create window: {e}"));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::debug!("window close requested");
            self.close_requested = true;
        }
    }
}

impl NativeWindow {
    /// Creates the event loop and the window.
    ///
    /// Pumps the event loop until the platform delivers the `resumed` event the
    /// window is created in.
    pub fn open(config: &WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut handler = Handler {
            config: config.clone(),
            window: None,
            create_error: None,
            close_requested: false,
        };

        let window = loop {
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);

            if let Some(err) = handler.create_error.take() {
                return Err(err);
            }
            if let Some(window) = &handler.window {
                break Arc::clone(window);
            }
            if let PumpStatus::Exit(code) = status {
                anyhow::bail!("event loop exited with code {code} before the window was created");
            }
        };

        log::debug!(
            "window created: {}x{}",
            config.size.width,
            config.size.height
        );

        Ok(Self {
            handler,
            window,
            event_loop,
        })
    }
}

impl WindowProvider for NativeWindow {
    type Handle = Arc<Window>;

    fn handle(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }

    fn poll_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(_) = status {
            self.handler.close_requested = true;
        }
    }

    fn close_requested(&self) -> bool {
        self.handler.close_requested
    }

    fn pre_present(&self) {
        self.window.pre_present_notify();
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        log::debug!("destroying window");
    }
}
