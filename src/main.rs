use anyhow::Result;
use clap::{Parser, Subcommand};

use campaign_dash::{cli, config, logging, web};

#[derive(Debug, Parser)]
#[command(name = "campaign-dash")]
#[command(about = "Campaign performance dashboard over an Excel workbook")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Listen address (default: [server].addr, 127.0.0.1:8501)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Render once and print tiles and chart data
    Summary {
        /// Campaign to show (default: the first one in the workbook)
        #[arg(long)]
        campaign: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List campaigns in workbook order
    Campaigns {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check configuration and the workbook
    Check,
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config to ~/.campaign-dash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `config set source.path ./campanhas.xlsx`
    Set { key: String, value: String },
    /// Overwrite the global config with defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();
    logging::init(cfg.logging.level);

    match app.command {
        Commands::Serve { addr, no_browser } => {
            let addr = addr.unwrap_or(cfg.server.addr);
            web::serve(&addr, cfg.server.open_browser && !no_browser)
        }
        Commands::Summary { campaign, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_summary(campaign.as_deref(), fmt)
        }
        Commands::Campaigns { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_campaigns(fmt)
        }
        Commands::Check => cli::run_check(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
