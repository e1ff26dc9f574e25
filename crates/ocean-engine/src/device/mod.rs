//! GPU device + surface management.
//!
//! This module is responsible for:
//! - turning the callback-based adapter/device requests into blocking calls
//! - creating the Device/Queue and configuring the Surface (swapchain)
//! - reporting asynchronous device faults
//!
//! All native calls go through [`GpuBackend`]; [`WgpuBackend`] is the
//! production implementation.

mod backend;
pub mod bridge;
mod diagnostics;
mod error;
mod inspect;
mod session;
mod surface;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{ColorAttachment, GpuBackend, RenderPassDesc};
pub use bridge::{Completer, RequestStatus, WaitStrategy};
pub use diagnostics::{DiagnosticSink, ErrorKind, GpuEvent, LostReason};
pub use error::SurfaceStatus;
pub use inspect::{AdapterReport, DeviceReport, LimitsSummary};
pub use session::{Session, SessionConfig};
pub use wgpu_backend::WgpuBackend;
