//! File system utilities for tanktrack
//!
//! Provides path resolution, JSON file operations and the level store.

mod json;
mod paths;
mod store;

pub use json::{read_config, read_json, write_config, write_json};
pub use paths::{
    find_data_root, get_config_path, get_data_dir, get_levels_dir, resolve_cwd, DATA_DIR_NAME,
};
pub use store::{
    load, load_level, load_site, save, save_level, save_site, JsonDirStore, MemoryStore, Store,
};
