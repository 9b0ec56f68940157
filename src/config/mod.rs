//! Configuration module for cmakegen
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CMAKEGEN_*)
//! 3. Project config (cmakegen.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_overrides, resolve, with_env_overrides, ConfigWarning, Overrides, DEFAULT_CONFIG_FILE,
};
pub use types::{Config, LayoutConfig, ProjectConfig, SourcesConfig};
