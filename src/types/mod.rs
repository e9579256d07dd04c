// Readpace shared type definitions
// Each submodule defines types used across the services.

pub mod document;
pub mod errors;
pub mod progress;
pub mod settings;
