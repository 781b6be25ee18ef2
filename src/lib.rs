//! Tanktrack - Construction stage tracking for water tanks
//!
//! This library provides the core functionality for the tanktrack CLI, including:
//! - Schema definitions for tanks, sub-tanks, stages and levels
//! - Domain logic for stage applicability, progression and completion
//! - File system utilities and the level store
//! - Seed data for new sites

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod seed;

// Re-export commonly used types
pub use errors::{Result, TanktrackError};
pub use schemas::{Config, Level, Site, Stage, StageStatus, Tank};
