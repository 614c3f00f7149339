//! Concord Core Library
//!
//! Core domain logic for the Concord grading-review coordinator:
//! inter-rater agreement analysis and reviewer workload balancing.

pub mod balance;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod records;
pub mod reliability;
pub mod stats;
