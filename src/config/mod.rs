//! Configuration module for Speak & Solve.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the provider
//! and session behaviour, `AppPaths` for cross-platform config directories,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ProviderConfig, SessionConfig};
