//! Single-threaded runtime pieces shared by the wheel picker crates.

pub mod callbacks;
pub mod collections;
pub mod frame_clock;
pub mod runtime;

pub use callbacks::{CallbackList, ListenerId};
pub use collections::map;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
