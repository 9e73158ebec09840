//! Completion-provider module.
//!
//! This module provides:
//! * [`CompletionProvider`] — async trait implemented by all provider
//!   backends.
//! * [`ApiProvider`] — OpenAI-compatible `/v1/chat/completions` client.
//! * [`PromptBuilder`] — builds the learning-content generation prompt.
//! * [`ProviderError`] — error variants for provider calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use speak_solve::config::AppConfig;
//! use speak_solve::content::extract;
//! use speak_solve::provider::{ApiProvider, CompletionProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let provider = ApiProvider::from_config(&config.provider);
//!
//!     let raw = provider.complete("photosynthesis").await.unwrap();
//!     let bundle = extract(&raw).unwrap();
//!     println!("{}", bundle.explanation);
//! }
//! ```

pub mod client;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiProvider, CompletionProvider, ProviderError};
pub use prompt::PromptBuilder;
