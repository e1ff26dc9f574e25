//! Application lifecycle.
//!
//! [`Application`] sequences window + GPU session creation, per-frame work and
//! teardown. Hosts drive it either with [`run_blocking`] or by calling
//! [`Application::run`] from their own scheduler.

mod app;
mod host;

pub use app::{AppConfig, Application, Lifecycle};
pub use host::run_blocking;
