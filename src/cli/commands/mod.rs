//! Command implementations for the parscan CLI
//!
//! Each command is organized into its own module.

pub mod bench;
pub mod config;
pub mod version;
