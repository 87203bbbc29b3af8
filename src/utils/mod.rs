//! Utility modules shared across the generator.

pub mod date;
pub mod exec;
pub mod minify;
pub mod slug;
