//! # LyrDB Common Library
//!
//! Shared code for the LyrDB catalog tools including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Read-only database access and lyrics count queries
//! - Progress arithmetic

pub mod config;
pub mod db;
pub mod error;
pub mod progress;

pub use error::{Error, Result};
pub use progress::ProgressSnapshot;
