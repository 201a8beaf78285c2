//! Configuration module for the newsletter builder
//!
//! This module handles the storage slot name, export branding and crop
//! options, including serialization to/from JSON and persistent storage in
//! the platform configuration directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
