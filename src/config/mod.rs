/// Configuration system for campaign-dash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::DashboardConfig::default()`]
/// 2. **User global config**: `~/.campaign-dash/config.toml`
/// 3. **Project local config**: `.campaign-dash.toml` in the current directory
/// 4. **Environment variables**: `DATABASE_URL` and `CAMPAIGN_DASH_*`
///    (highest precedence)
///
/// File layers are merged key by key, so a project file that only sets
/// `[source].sheet` keeps the global file's `[source].path`.
///
/// The dashboard calls [`load`] on every render: fixing a config file or the
/// workbook path takes effect on the next interaction without a restart.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::DashboardConfig;

/// Environment variable holding the workbook path. The name is historical:
/// it carries a filesystem path, not a connection string.
pub const SOURCE_ENV_VAR: &str = "DATABASE_URL";

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → environment variables.
pub fn load() -> DashboardConfig {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .filter_map(|path| {
            let label = path.as_ref()?.display().to_string();
            load_toml_layer(path).map(|layer| (label, layer))
        });

    let mut config = merge_layers(layers);
    apply_env_overrides(&mut config);
    config
}

/// Merge file layers in order, lowest precedence first.
///
/// Each layer is checked on its own before merging: a layer holding a value
/// of the wrong type is skipped whole, and the layers around it still apply.
fn merge_layers(layers: impl IntoIterator<Item = (String, toml::Value)>) -> DashboardConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for (label, layer) in layers {
        if let Err(e) = layer.clone().try_into::<DashboardConfig>() {
            tracing::warn!(path = %label, error = %e, "ignoring config file with invalid values");
            continue;
        }
        merge_values(&mut merged, layer);
    }

    merged.try_into().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "merged config is invalid, using defaults");
        DashboardConfig::default()
    })
}

/// Read one TOML layer from disk.
///
/// Returns `None` when the path is unknown, the file does not exist, or the
/// content is not valid TOML. A malformed file never prevents the dashboard
/// from starting.
fn load_toml_layer(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Recursively merge `overlay` into `base`. Tables merge per key; any other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.campaign-dash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".campaign-dash").join("config.toml"))
}

/// Path to the project local config: `.campaign-dash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".campaign-dash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides from the process environment.
///
/// Supported variables:
/// - `DATABASE_URL`: workbook path
/// - `CAMPAIGN_DASH_SHEET`: sheet name
/// - `CAMPAIGN_DASH_ADDR`: server listen address
/// - `CAMPAIGN_DASH_OPEN_BROWSER`: open the browser on start (`1`/`true`)
/// - `CAMPAIGN_DASH_CURRENCY`: currency symbol
/// - `CAMPAIGN_DASH_LOG_LEVEL`: default log level
fn apply_env_overrides(config: &mut DashboardConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using an arbitrary variable lookup.
fn apply_overrides_from(config: &mut DashboardConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var(SOURCE_ENV_VAR)
        && !val.trim().is_empty()
    {
        config.source.path = val.trim().to_string();
    }
    if let Some(val) = var("CAMPAIGN_DASH_SHEET") {
        config.source.sheet = val;
    }
    if let Some(val) = var("CAMPAIGN_DASH_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = var("CAMPAIGN_DASH_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = var("CAMPAIGN_DASH_CURRENCY")
        && !val.is_empty()
    {
        config.display.currency_symbol = val;
    }
    if let Some(val) = var("CAMPAIGN_DASH_LOG_LEVEL")
        && let Some(level) = parse_log_level(&val)
    {
        config.logging.level = level;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a log level string.
fn parse_log_level(val: &str) -> Option<schema::LogLevel> {
    match val.trim().to_ascii_lowercase().as_str() {
        "error" => Some(schema::LogLevel::Error),
        "warn" | "warning" => Some(schema::LogLevel::Warn),
        "info" => Some(schema::LogLevel::Info),
        "debug" => Some(schema::LogLevel::Debug),
        "trace" => Some(schema::LogLevel::Trace),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.campaign-dash/config.toml`.
///
/// Returns an error if the file already exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.campaign-dash/ directory")?;
    }

    fs::write(&path, DashboardConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (e.g. `source.path`) in the global config file.
///
/// Starts from the existing file, or from the defaults when there is none,
/// and keeps the type of the value being replaced.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let current = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&DashboardConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&current).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would make the file unloadable.
    root.clone()
        .try_into::<DashboardConfig>()
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table for '{key}'"))?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert((*leaf).to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
