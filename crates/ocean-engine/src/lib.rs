//! Ocean engine crate.
//!
//! Opens a window, acquires a GPU device through wgpu and clears the surface
//! to a flat color every frame.

pub mod core;
pub mod device;
pub mod frame;
pub mod time;
pub mod window;

pub mod logging;
