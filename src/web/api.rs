//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content. The configuration is
//! re-read on every request so edits take effect on the next interaction.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::config::{self, DashboardConfig};
use crate::data::WorkbookSource;

use super::content_type_json;
use super::session::DashboardSession;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// `POST /api/select` body.
#[derive(Debug, Deserialize)]
struct SelectRequest {
    campaign: String,
}

/// Config API response: the effective config plus its TOML rendering.
#[derive(Serialize)]
struct ConfigResponse {
    config: DashboardConfig,
    toml_text: String,
}

/// Health API response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    source_configured: bool,
    source_path: Option<String>,
    source_exists: bool,
    sheet: Option<String>,
    global_config_exists: bool,
    project_config_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

fn source_for(config: &DashboardConfig) -> WorkbookSource {
    WorkbookSource::from_config(&config.source)
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/page`: render with the stored selection.
pub fn get_page(session: &DashboardSession) -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();
    json_response(&session.page(&source_for(&cfg), &cfg))
}

/// `POST /api/select`: store the chosen campaign and render.
///
/// Expects JSON body: `{ "campaign": "Black Friday" }`
pub fn post_select(session: &mut DashboardSession, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: SelectRequest =
        serde_json::from_str(body).context("invalid JSON in select request")?;
    let cfg = config::load();
    json_response(&session.select(&req.campaign, &source_for(&cfg), &cfg))
}

/// `POST /api/reset`: clear the selection and render from scratch.
pub fn post_reset(session: &mut DashboardSession) -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();
    json_response(&session.reset(&source_for(&cfg), &cfg))
}

/// `GET /api/config`: current effective configuration.
pub fn get_config() -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();
    let toml_text = toml::to_string_pretty(&cfg).unwrap_or_default();
    json_response(&ConfigResponse {
        config: cfg,
        toml_text,
    })
}

/// `GET /api/health`: where the data is expected to come from.
pub fn get_health() -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&health(&config::load()))
}

fn health(cfg: &DashboardConfig) -> HealthResponse {
    let source = source_for(cfg);
    let exists = |p: Option<std::path::PathBuf>| p.map(|p| p.exists()).unwrap_or(false);

    HealthResponse {
        source_configured: source.path().is_some(),
        source_path: source.path().map(|p| p.display().to_string()),
        source_exists: source.path().map(|p| p.is_file()).unwrap_or(false),
        sheet: source.sheet().map(str::to_string),
        global_config_exists: exists(config::global_config_file()),
        project_config_exists: exists(config::project_config_file()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
