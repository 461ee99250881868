//! Per-frame globals block.
//!
//! Frame counter, elapsed time and delta time, published once per frame.
//! The updater is the only writer; the engine owns the process-wide one.

use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use crate::binding::schema::FRAME_GLOBALS_SIZE;

/// Shader-facing globals block: `{ frame: u32, time: f32, delta_time: f32, padding: u32 }`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameGlobals {
    /// Frames advanced since reset; wraps at `u32::MAX`
    pub frame: u32,
    /// Seconds accumulated from non-negative deltas
    pub time: f32,
    /// Seconds since the previous frame, never negative
    pub delta_time: f32,
    pub padding: u32,
}

const _: () = assert!(size_of::<FrameGlobals>() == FRAME_GLOBALS_SIZE);

impl FrameGlobals {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Advances the globals block from a monotonic clock reading.
#[derive(Debug, Clone)]
pub struct FrameGlobalsUpdater {
    current: FrameGlobals,
    previous: f64,
    elapsed: f64,
}

impl FrameGlobalsUpdater {
    /// Updater whose clock starts at 0 seconds
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Updater whose first delta is measured from `start` seconds
    pub fn starting_at(start: f64) -> Self {
        Self {
            current: FrameGlobals::default(),
            previous: if start.is_finite() { start } else { 0.0 },
            elapsed: 0.0,
        }
    }

    /// Advance one frame to clock reading `now` (seconds).
    ///
    /// The frame counter wraps. A reading earlier than the previous one
    /// yields a zero delta and becomes the new reference; a non-finite
    /// reading yields a zero delta and is ignored.
    pub fn advance(&mut self, now: f64) -> FrameGlobals {
        let delta = if now.is_finite() {
            let delta = (now - self.previous).max(0.0);
            self.previous = now;
            delta
        } else {
            0.0
        };

        self.elapsed += delta;
        self.current = FrameGlobals {
            frame: self.current.frame.wrapping_add(1),
            time: self.elapsed as f32,
            delta_time: delta as f32,
            padding: 0,
        };
        self.current
    }

    /// Globals published by the last `advance`
    pub fn current(&self) -> FrameGlobals {
        self.current
    }

    /// Clock reading the next delta is measured from
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Restart at frame 0, time 0, measuring from `start`
    pub fn reset(&mut self, start: f64) {
        *self = Self::starting_at(start);
    }
}

impl Default for FrameGlobalsUpdater {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "globals_tests.rs"]
mod tests;
