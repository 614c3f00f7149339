//! CLI commands for concord

pub mod assign;
pub mod dispatch;
pub mod grade;
pub mod helpers;
pub mod init;
pub mod note;
pub mod reliability;
pub mod reviewer;
pub mod workload;
