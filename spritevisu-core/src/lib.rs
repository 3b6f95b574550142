//! # Core models for spritevisu.
//!
//! This small crate holds the pieces shared by every spritevisu tool: the
//! genome size reference loaded from a JSON file, and reader utilities for
//! plain or gzip-compressed inputs.
pub mod genome;
pub mod utils;

// Re-exports
pub use genome::*;
pub use utils::*;
