//! Renderer interface module
//!
//! The backend trait the frame pipeline drives.

mod backend;
pub(crate) mod mock_backend;

pub use backend::RenderBackend;
