//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `VisitedSets`: forum, subforum and topic IDs already claimed in this run
//! - `WorkStack`: explicit depth-first stack of pending traversal frames

mod visited;
mod work_stack;

// Re-export main types
pub use visited::VisitedSets;
pub use work_stack::{CrawlTarget, Frame, WorkStack};
