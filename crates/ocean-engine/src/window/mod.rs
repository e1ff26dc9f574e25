//! Window provider.
//!
//! The lifecycle controller only needs three things from a window: a handle to
//! build the surface from, a non-blocking event pump, and whether the user
//! asked to close it. [`NativeWindow`] provides them over `winit`.

#[cfg(not(target_arch = "wasm32"))]
mod native;

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeWindow;

use winit::dpi::PhysicalSize;

/// Window configuration.
///
/// The size is fixed for the lifetime of the window; the window is not
/// resizable.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub size: PhysicalSize<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Web Ocean GPU".to_string(),
            size: PhysicalSize::new(640, 480),
        }
    }
}

/// A window the GPU session presents into.
///
/// Dropping the provider destroys the window.
pub trait WindowProvider {
    /// Handle the GPU backend creates its surface from.
    type Handle;

    fn handle(&self) -> Self::Handle;

    /// Processes pending window/input events without blocking.
    fn poll_events(&mut self);

    /// True once the windowing system delivered a close request.
    fn close_requested(&self) -> bool;

    /// Called right before a frame is presented.
    fn pre_present(&self) {}
}
