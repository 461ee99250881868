//! Frame module - per-frame globals and the frame pipeline

mod globals;
mod renderer;

pub use globals::{FrameGlobals, FrameGlobalsUpdater};
pub use renderer::{FramePacket, FrameRenderer};
