//! Shared error model and configuration for QueryLens.
//!
//! This crate is the foundation depended on by the other QueryLens crates.
//! It provides:
//! - [`QueryLensError`] — the unified error type
//! - Configuration ([`AppConfig`], [`UiConfig`], [`LoggingConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, HOME_ENV, LoggingConfig, StartTab, UiConfig, config_dir, config_file_path,
    init_config, init_config_at, load_config, load_config_from,
};
pub use error::{QueryLensError, Result};
