//! # hd-core
//!
//! Core types and error definitions for holidate.
//!
//! This crate provides the building blocks shared across the other crates in
//! the workspace – the error taxonomy, the fixed-capacity [`LruCache`] used by
//! the holiday engine and the business-day calculator, and [`Settings`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Least-recently-used cache with hit/miss accounting.
pub mod cache;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Cache capacities and iteration bounds.
pub mod settings;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use cache::{CacheStats, LruCache};
pub use errors::{Error, Result};
pub use settings::Settings;
