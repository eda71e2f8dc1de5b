// Core modules
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preflight;
pub mod raster;
pub mod record;
pub mod report;
pub mod state;
pub mod template;
pub mod writer;

// Re-export commonly used types
pub use error::{CardforgeError, Result};
