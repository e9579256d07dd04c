//! Readpace: reading-time estimate and live reading progress for
//! article-like pages.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod platform;
pub mod services;
pub mod types;
