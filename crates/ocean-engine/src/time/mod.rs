//! Frame timing.
//!
//! One `FrameClock` per frame driver; `tick()` once per driven frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
