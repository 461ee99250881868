/// Lumen3D Engine - Singleton manager for engine subsystems
///
/// Holds the process-wide configuration, the material registry singleton,
/// the frame clock and the logger. Uses thread-safe static storage with
/// RwLock/Mutex for safe concurrent access.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use std::time::SystemTime;
use crate::binding::BindGroupLayoutRegistry;
use crate::config::Config;
use crate::error::Result;
use crate::frame::{FrameGlobals, FrameGlobalsUpdater};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::resource::MaterialRegistry;
use crate::engine_err;

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped (stored as `LogSeverity as u8`)
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Trace as u8);

/// Internal state structure holding all engine singletons
struct EngineState {
    config: RwLock<Config>,
    material_registry: RwLock<Option<Arc<Mutex<MaterialRegistry>>>>,
    /// Sole writer of the process-wide frame globals
    frame_clock: Mutex<FrameGlobalsUpdater>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            material_registry: RwLock::new(None),
            frame_clock: Mutex::new(FrameGlobalsUpdater::new()),
        }
    }
}

fn state() -> Result<&'static EngineState> {
    ENGINE_STATE.get().ok_or_else(|| {
        engine_err!("lumen3d::Engine", InitializationFailed,
            "Engine not initialized. Call Engine::initialize() first.")
    })
}

fn poisoned(what: &str) -> crate::error::Error {
    engine_err!("lumen3d::Engine", BackendError, "{} lock poisoned", what)
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```no_run
/// use lumen_3d_core::lumen3d::{Engine, BindGroupLayoutRegistry};
///
/// Engine::initialize()?;
/// Engine::create_material_registry(BindGroupLayoutRegistry::standard())?;
///
/// let globals = Engine::advance_frame(0.016)?;
/// assert_eq!(globals.frame, 1);
///
/// Engine::shutdown();
/// # Ok::<(), lumen_3d_core::lumen3d::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize the engine with the default configuration.
    pub fn initialize() -> Result<()> {
        Self::initialize_with_config(Config::default())
    }

    /// Initialize the engine.
    ///
    /// Installs `config` and resets the frame clock to frame 0, time 0.
    /// Calling it again re-applies both; existing singletons are kept.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if the configuration is invalid.
    pub fn initialize_with_config(config: Config) -> Result<()> {
        config.validate()?;
        let state = ENGINE_STATE.get_or_init(EngineState::new);

        MIN_SEVERITY.store(config.min_log_severity as u8, Ordering::Relaxed);
        *state.config.write().map_err(|_| poisoned("Config"))? = config;
        state.frame_clock.lock().map_err(|_| poisoned("Frame clock"))?.reset(0.0);

        crate::engine_info!("lumen3d::Engine", "Engine initialized");
        Ok(())
    }

    /// Shutdown the engine and destroy all singletons
    ///
    /// After calling this, call `initialize()` again before creating new subsystems.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut registry) = state.material_registry.write() {
                *registry = None;
            }
            if let Ok(mut clock) = state.frame_clock.lock() {
                clock.reset(0.0);
            }
        }
    }

    /// Active configuration
    pub fn config() -> Result<Config> {
        let lock = state()?.config.read().map_err(|_| poisoned("Config"))?;
        Ok(lock.clone())
    }

    // ===== MATERIAL REGISTRY API =====

    /// Create and register the material registry singleton.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A material registry already exists
    pub fn create_material_registry(layouts: BindGroupLayoutRegistry) -> Result<()> {
        let mut lock = state()?.material_registry.write()
            .map_err(|_| poisoned("MaterialRegistry"))?;

        if lock.is_some() {
            return Err(engine_err!("lumen3d::Engine", InitializationFailed,
                "MaterialRegistry already exists. Call Engine::destroy_material_registry() first."));
        }

        *lock = Some(Arc::new(Mutex::new(MaterialRegistry::new(layouts))));
        crate::engine_info!("lumen3d::Engine", "MaterialRegistry singleton created successfully");
        Ok(())
    }

    /// Get the material registry singleton
    pub fn material_registry() -> Result<Arc<Mutex<MaterialRegistry>>> {
        let lock = state()?.material_registry.read()
            .map_err(|_| poisoned("MaterialRegistry"))?;

        lock.clone().ok_or_else(|| {
            engine_err!("lumen3d::Engine", InitializationFailed,
                "MaterialRegistry not created. Call Engine::create_material_registry() first.")
        })
    }

    /// Destroy the material registry singleton.
    ///
    /// Existing `Arc` references remain valid until dropped.
    pub fn destroy_material_registry() -> Result<()> {
        let mut lock = state()?.material_registry.write()
            .map_err(|_| poisoned("MaterialRegistry"))?;

        *lock = None;
        crate::engine_info!("lumen3d::Engine", "MaterialRegistry singleton destroyed");
        Ok(())
    }

    // ===== FRAME CLOCK API =====

    /// Advance the process-wide frame globals to clock reading `now`
    /// (seconds since initialization).
    pub fn advance_frame(now: f64) -> Result<FrameGlobals> {
        let mut clock = state()?.frame_clock.lock().map_err(|_| poisoned("Frame clock"))?;
        Ok(clock.advance(now))
    }

    /// Frame globals published by the last `advance_frame`
    pub fn frame_globals() -> Result<FrameGlobals> {
        let clock = state()?.frame_clock.lock().map_err(|_| poisoned("Frame clock"))?;
        Ok(clock.current())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        Self::shutdown();
        MIN_SEVERITY.store(LogSeverity::Trace as u8, Ordering::Relaxed);
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, test buffer, etc.)
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Whether entries of `severity` currently reach the logger
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
