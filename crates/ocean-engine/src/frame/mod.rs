//! Per-frame work: acquire, clear, submit, present.

mod driver;

pub use driver::{FrameDriver, FrameOutcome, FrameStats};
