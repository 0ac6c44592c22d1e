//! Output module for run reporting
//!
//! This module handles:
//! - Recording archive run statistics
//! - Printing the end-of-run summary

pub mod stats;

pub use stats::{print_statistics, ArchiveStats};
