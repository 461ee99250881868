//! Engine configuration

use crate::error::Result;
use crate::log::LogSeverity;

/// Engine-wide configuration, installed with `Engine::initialize_with_config`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Scenes with at least this many drawables are culled on the rayon pool
    pub parallel_cull_threshold: usize,
    /// Drawables per parallel culling task
    pub cull_chunk_size: usize,
    /// Entries below this severity are dropped before reaching the logger
    pub min_log_severity: LogSeverity,
}

impl Config {
    /// Reject settings that cannot drive a culling pass.
    pub fn validate(&self) -> Result<()> {
        if self.cull_chunk_size == 0 {
            crate::engine_bail!("lumen3d::Config", InitializationFailed,
                "cull_chunk_size must be at least 1");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_cull_threshold: 2048,
            cull_chunk_size: 256,
            min_log_severity: if cfg!(debug_assertions) {
                LogSeverity::Debug
            } else {
                LogSeverity::Info
            },
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
