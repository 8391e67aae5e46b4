//! CLI command implementations for campaign-dash.
//!
//! Provides subcommand handlers for:
//! - `campaign-dash summary`: one render pass printed to the terminal
//! - `campaign-dash campaigns`: list campaigns in first-seen order
//! - `campaign-dash check`: validate configuration and the workbook
//! - `campaign-dash config show|init|set|reset`: configuration management

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config;
use crate::dashboard::{self, PageModel, RenderContext, StatusLevel};
use crate::data::{self, TableSource, WorkbookSource};

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// campaign-dash summary
// ---------------------------------------------------------------------------

/// Render once and print the result.
///
/// Fails (non-zero exit) when the render halted; the status lines are still
/// printed first.
pub fn run_summary(campaign: Option<&str>, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let source = WorkbookSource::from_config(&cfg.source);
    let ctx = match campaign {
        Some(name) => RenderContext::with_selection(name),
        None => RenderContext::default(),
    };

    let page = dashboard::render(&source, &ctx, &cfg);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Csv => print_summary_csv(&page),
        OutputFormat::Table => print_summary_table(&page),
    }

    if let Some(err) = page.error() {
        bail!("{}", err.message);
    }
    Ok(())
}

fn print_summary_table(page: &PageModel) {
    println!("{}", page.title.bold().cyan());
    println!("{}", "=".repeat(60));

    for line in &page.status {
        match line.level {
            StatusLevel::Success => println!("{}", line.message.green()),
            StatusLevel::Error => println!("{}", line.message.red()),
        }
    }

    let Some(content) = &page.content else {
        return;
    };

    println!();
    println!(
        "  {} {} ({} of {} campaigns, {} rows)",
        "Campaign:".bold(),
        content.selected_campaign,
        content
            .campaigns
            .iter()
            .position(|c| *c == content.selected_campaign)
            .map(|i| i + 1)
            .unwrap_or(0),
        content.campaigns.len(),
        content.filtered_rows,
    );
    println!();

    println!("{}", content.section_title.bold().cyan());
    for tile in &content.tiles {
        println!("  {:<14} {:>20}", tile.label.bold(), tile.value);
    }

    for chart in &content.charts {
        println!();
        println!("{}", chart.title.bold().cyan());
        println!("  {:<28} {:<16} {:>14}", chart.y.title, "Série", "Valor");
        println!("  {}", "-".repeat(60));
        for (i, d) in chart.data.iter().enumerate() {
            let line = format!(
                "  {:<28} {:<16} {:>14}",
                truncate(&d.category, 28),
                d.series,
                format_value(d.value)
            );
            if i % 2 == 0 {
                println!("{}", line);
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn print_summary_csv(page: &PageModel) {
    let Some(content) = &page.content else {
        return;
    };
    println!("campaign,key,label,value");
    for tile in &content.tiles {
        println!(
            "{},{},{},{}",
            csv_field(&content.selected_campaign),
            tile.key,
            csv_field(tile.label),
            csv_field(&tile.value)
        );
    }
}

// ---------------------------------------------------------------------------
// campaign-dash campaigns
// ---------------------------------------------------------------------------

/// List the campaigns in the workbook, first-seen order.
pub fn run_campaigns(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let source = WorkbookSource::from_config(&cfg.source);
    let table = data::load_table(&source)?;
    let names = dashboard::filter::campaign_names(&table);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Csv => {
            println!("campaign");
            for name in &names {
                println!("{}", csv_field(name));
            }
        }
        OutputFormat::Table => {
            if names.is_empty() {
                println!("{}", "No campaigns in the workbook.".yellow());
                return Ok(());
            }
            println!("{}", "Campaigns".bold().cyan());
            for (i, name) in names.iter().enumerate() {
                let marker = if i == 0 { "(default)".dimmed().to_string() } else { String::new() };
                println!("  {:>3}. {} {}", i + 1, name, marker);
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-dash check
// ---------------------------------------------------------------------------

/// Check configuration files and the workbook: path, sheet, columns, rows.
pub fn run_check() -> Result<()> {
    println!("{}", "campaign-dash Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_check_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.campaign-dash/config.toml found"
        } else {
            "not found (run `campaign-dash config init` to create)"
        },
    );
    print_check_item(
        "Project config",
        project_exists,
        if project_exists {
            ".campaign-dash.toml found"
        } else {
            "none (optional)"
        },
    );

    let cfg = config::load();
    let source = WorkbookSource::from_config(&cfg.source);

    let Some(path) = source.path() else {
        print_check_item(
            "Source",
            false,
            &format!("not configured (set {} or [source].path)", config::SOURCE_ENV_VAR),
        );
        bail!("no data source configured");
    };
    let exists = path.is_file();
    print_check_item("Source file", exists, &path.display().to_string());
    print_check_item("Sheet", true, source.sheet().unwrap_or("first sheet"));

    let table = match data::load_table(&source) {
        Ok(table) => table,
        Err(e) => {
            print_check_item("Workbook", false, &e.to_string());
            bail!("{} cannot be loaded", source.describe());
        }
    };
    print_check_item("Columns", true, "all required columns present");
    print_check_item("Records", !table.is_empty(), &format!("{} rows", table.len()));

    let campaigns = dashboard::filter::campaign_names(&table);
    print_check_item(
        "Campaigns",
        !campaigns.is_empty(),
        &match campaigns.first() {
            Some(first) => format!("{} (default: {first})", campaigns.len()),
            None => "none".to_string(),
        },
    );

    if campaigns.is_empty() {
        bail!("the workbook contains no campaigns");
    }
    Ok(())
}

fn print_check_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// campaign-dash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective campaign-dash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.campaign-dash/config.toml", global_exists);
    print_source(".campaign-dash.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        format!("{} and CAMPAIGN_DASH_* environment variables", config::SOURCE_ENV_VAR).dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.campaign-dash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Set [source].path to your campaign workbook.".dimmed()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Chart values are whole numbers except spend; print them without noise.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
        assert_eq!(truncate("impressões", 6), "impre…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("Black Friday"), "Black Friday");
        assert_eq!(csv_field("R$ 1,234.50"), "\"R$ 1,234.50\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1500.0), "1500");
        assert_eq!(format_value(200.5), "200.50");
    }
}
