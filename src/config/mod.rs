//! Configuration: types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, default_recent_path, path_has_symlink_ancestor};
pub use types::{CollisionMode, Config, LogLevel};
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init, parse_config_xml};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VERI_MOVE_CONFIG";

/// Directory name used under the OS config/data dirs.
pub const APP_DIR: &str = "veri_move";
