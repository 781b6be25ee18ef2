//! CLI command implementations

pub mod advance;
pub mod init;
pub mod list;
pub mod report;
pub mod show;
pub mod stages;
pub mod undo;
