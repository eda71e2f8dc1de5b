//! Configuration - cardforge.toml schema, defaults, and CLI overrides

pub mod consts;
pub mod model;

pub use model::{Config, InputsConfig, OutputConfig, Overrides, RasterConfig, TableConfig};
