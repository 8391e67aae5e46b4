/// Configuration schema and defaults for campaign-dash.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[source]`, `[server]`, `[display]`, `[charts]` and `[logging]`.
///
/// Every field has a built-in default; users only set what they want to
/// override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level dashboard configuration.
///
/// Maps directly to `~/.campaign-dash/config.toml` and
/// `.campaign-dash.toml`. All sections are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub display: DisplayConfig,
    pub charts: ChartsConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [source]
// ---------------------------------------------------------------------------

/// Where the campaign workbook lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the `.xlsx` export. Overridden by `DATABASE_URL`.
    pub path: String,
    /// Sheet name to read. Empty means the first sheet.
    pub sheet: String,
}

impl SourceConfig {
    /// The configured sheet, or `None` for "first sheet".
    pub fn sheet_name(&self) -> Option<&str> {
        let sheet = self.sheet.trim();
        if sheet.is_empty() { None } else { Some(sheet) }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `campaign-dash serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8501".to_string(),
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

/// Page texts and number formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub section_title: String,
    /// Status line shown after a successful load.
    pub greeting: String,
    /// Prefix for spend, CPC and CPM tiles.
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Dashboard Trafego Pago".to_string(),
            section_title: "Métricas Meta Ads".to_string(),
            greeting: "✅ Ola seja bem vindo".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [charts]
// ---------------------------------------------------------------------------

/// Fixed pixel dimensions shared by both charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartsConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Log verbosity for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: LogLevel,
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl DashboardConfig {
    /// The annotated default config written by `campaign-dash config init`.
    pub fn default_toml() -> String {
        r#"# campaign-dash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (DATABASE_URL, CAMPAIGN_DASH_*)
#   2. Project config (.campaign-dash.toml in current directory)
#   3. User global config (~/.campaign-dash/config.toml)
#   4. Built-in defaults

[source]
path = ""        # Workbook path; DATABASE_URL overrides this
sheet = ""       # Empty = first sheet

[server]
addr = "127.0.0.1:8501"
open_browser = false

[display]
title = "Dashboard Trafego Pago"
section_title = "Métricas Meta Ads"
greeting = "✅ Ola seja bem vindo"
currency_symbol = "R$"

[charts]
width = 400
height = 300

[logging]
level = "info"   # error | warn | info | debug | trace (RUST_LOG wins)
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_produces_defaults() {
        let config: DashboardConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.server.addr, "127.0.0.1:8501");
        assert_eq!(config.display.currency_symbol, "R$");
        assert_eq!(config.charts.width, 400);
        assert_eq!(config.charts.height, 300);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml_str = r#"
[source]
path = "/data/meta.xlsx"

[logging]
level = "debug"
"#;
        let config: DashboardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source.path, "/data/meta.xlsx");
        assert_eq!(config.source.sheet_name(), None);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.display.title, "Dashboard Trafego Pago");
    }

    #[test]
    fn sheet_name_ignores_whitespace() {
        let source = SourceConfig {
            path: String::new(),
            sheet: "  Planilha1 ".to_string(),
        };
        assert_eq!(source.sheet_name(), Some("Planilha1"));
    }

    #[test]
    fn default_toml_parses_back() {
        let config: DashboardConfig = toml::from_str(&DashboardConfig::default_toml()).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn log_level_display() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
