//! Configuration loading

mod loader;

pub use loader::{classifier, load_config, validate_config};
