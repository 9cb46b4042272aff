//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, LogConfig) and loading
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Queue capacities and frame size limits (LimitsConfig)
//! - [`validation`]: Startup checks that report every problem at once

mod limits;
mod listen;
mod types;
pub mod validation;

pub use limits::LimitsConfig;
pub use types::{Config, DEFAULT_CONFIG_PATH, LogFormat};
pub use validation::validate;
