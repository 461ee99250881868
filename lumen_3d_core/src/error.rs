//! Error types for the Lumen3D core
//!
//! Every fallible operation in the crate returns [`Result`]. Camera errors are
//! per-frame (skip or fix the camera and retry next frame); variant and
//! resource errors are configuration errors raised at registration time.

use std::fmt;

/// Result type for Lumen3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumen3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Camera matrices or lens parameters cannot produce a usable frustum
    DegenerateCamera(String),

    /// A material variant has no registered binding layout or shader pair
    UnsupportedVariant(String),

    /// Resources supplied for a material do not match its binding layout
    ResourceMismatch(String),

    /// Invalid or stale resource (handle, layout, shader module, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, registries, builders)
    InitializationFailed(String),

    /// Error reported by the external render backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateCamera(msg) => write!(f, "Degenerate camera: {}", msg),
            Error::UnsupportedVariant(msg) => write!(f, "Unsupported material variant: {}", msg),
            Error::ResourceMismatch(msg) => write!(f, "Resource mismatch: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] of the given variant and log it at ERROR severity.
///
/// ```ignore
/// let err = engine_err!("lumen3d::Frustum", DegenerateCamera, "plane {} has no normal", i);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::lumen3d::Error::$kind(message)
    }};
}

/// Log and return an [`Error`] from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
