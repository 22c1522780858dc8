//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on first run at the default location.
//!
//! Empty elements count as unset. Unknown elements and unparsable values are
//! hard errors so a typo never silently falls back to a default.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::{Deserialize, Deserializer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::CONFIG_ENV;
use super::paths::{default_config_path, default_log_path, default_recent_path, path_has_symlink_ancestor};
use super::types::{CollisionMode, Config, LogLevel};
use crate::platform::{set_dir_mode_0700, write_file_atomic};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config", deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    destination: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    on_collision: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    log_level: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    recent_file: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    progress: Option<String>,
}

/// Optional string, trimmed; empty becomes None.
fn de_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => bail!("invalid boolean for <{field}>: '{s}'"),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    cfg.destination = parsed.destination.map(PathBuf::from);
    if let Some(s) = parsed.on_collision {
        cfg.on_collision = s.parse::<CollisionMode>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = parsed.log_level {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = parsed.log_file.map(PathBuf::from);
    if let Some(p) = parsed.recent_file {
        cfg.recent_file = Some(PathBuf::from(p));
    }
    if let Some(s) = parsed.progress {
        cfg.progress = parse_bool("progress", &s)?;
    }
    Ok(cfg)
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("in config file '{}'", path.display()))
}

/// What `load_or_init` found.
#[derive(Debug)]
pub enum LoadResult {
    Loaded { config: Config, path: PathBuf },
    /// No config at the default location; a template was written there.
    CreatedTemplate(PathBuf),
    /// No config and no template (no usable config directory).
    Defaults,
}

/// Load the active config file, creating a template at the default
/// location on first run. An explicit `$VERI_MOVE_CONFIG` must exist.
pub fn load_or_init() -> Result<LoadResult> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        return Ok(LoadResult::Defaults);
    };

    if path.exists() {
        let config = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded { config, path });
    }
    if explicit {
        bail!("config file set by {CONFIG_ENV} does not exist: {}", path.display());
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Write the commented template config (0600, parent 0700 on Unix).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/veri_move.log".into());
    let suggested_recent = default_recent_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/recent_destinations.json".into());

    let content = format!(
        "<!--\n  veri_move configuration (XML)\n\n    destination   -> folder used when no destination is given on the command line\n    on_collision  -> ask | overwrite | rename | skip\n    log_level     -> quiet | normal | info | debug\n    log_file      -> optional log file (logs always go to stderr too)\n    recent_file   -> where recently used destinations are remembered\n    progress      -> true | false (progress bar)\n\n  Empty elements are treated as unset. CLI flags override these values.\n-->\n<config>\n  <destination></destination>\n  <on_collision>ask</on_collision>\n  <log_level>normal</log_level>\n  <!-- <log_file>{suggested_log}</log_file> -->\n  <recent_file>{suggested_recent}</recent_file>\n  <progress>true</progress>\n</config>\n"
    );

    write_file_atomic(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
