//! The render pipeline: load → normalize → filter → aggregate → build.
//!
//! [`render`] is a pure function of its inputs apart from reading the
//! source. Both the web dispatcher and the CLI call it once per
//! interaction; nothing survives between calls except the caller's
//! [`RenderContext`].

use serde::Serialize;

use super::charts::{self, ChartSpec};
use super::filter::{self, RenderContext};
use super::format::{self, MetricTile};
use super::kpi::KpiSnapshot;
use crate::config::DashboardConfig;
use crate::data::{self, TableSource};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Page model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    Error,
}

/// One line of the status area above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub level: StatusLevel,
    /// Error kind (`load_error`, `missing_column`, ...) for error lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub message: String,
}

/// Everything below the status area. Absent when the render halted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardContent {
    pub section_title: String,
    /// Selector options, first-seen order.
    pub campaigns: Vec<String>,
    pub selected_campaign: String,
    /// Rows in the filtered view.
    pub filtered_rows: usize,
    pub kpis: KpiSnapshot,
    pub tiles: Vec<MetricTile>,
    /// Laid out side by side, in this order.
    pub charts: Vec<ChartSpec>,
}

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageModel {
    pub title: String,
    pub status: Vec<StatusLine>,
    pub content: Option<DashboardContent>,
}

impl PageModel {
    /// Whether an error stopped the render.
    pub fn halted(&self) -> bool {
        self.content.is_none()
    }

    /// The first error line, if any.
    pub fn error(&self) -> Option<&StatusLine> {
        self.status.iter().find(|s| s.level == StatusLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Run all stages and produce the page.
///
/// Errors never escape: they become an error status line and an empty
/// content section. A load failure shows only the error; a failure after a
/// successful load keeps the greeting above it.
pub fn render(
    source: &dyn TableSource,
    ctx: &RenderContext,
    config: &DashboardConfig,
) -> PageModel {
    let title = config.display.title.clone();
    let greeting = StatusLine {
        level: StatusLevel::Success,
        kind: None,
        message: config.display.greeting.clone(),
    };

    match build_content(source, ctx, config) {
        Ok(content) => {
            tracing::info!(
                source = %source.describe(),
                campaign = %content.selected_campaign,
                rows = content.filtered_rows,
                "render complete"
            );
            PageModel {
                title,
                status: vec![greeting],
                content: Some(content),
            }
        }
        Err(err) => {
            tracing::warn!(source = %source.describe(), kind = err.kind(), error = %err, "render halted");
            let error_line = StatusLine {
                level: StatusLevel::Error,
                kind: Some(err.kind()),
                message: err.user_message(),
            };
            let status = match err {
                DashboardError::Load(_) => vec![error_line],
                _ => vec![greeting, error_line],
            };
            PageModel {
                title,
                status,
                content: None,
            }
        }
    }
}

/// The fallible part of [`render`].
pub fn build_content(
    source: &dyn TableSource,
    ctx: &RenderContext,
    config: &DashboardConfig,
) -> Result<DashboardContent, DashboardError> {
    let table = data::load_table(source)?;

    let campaigns = filter::campaign_names(&table);
    let selected_campaign = filter::resolve_selection(ctx, &campaigns)?;
    let view = filter::filter_by_campaign(&table, &selected_campaign);

    let kpis = KpiSnapshot::from_records(view.records.iter().copied())?;
    let tiles = format::metric_tiles(&kpis, &config.display.currency_symbol);

    // Charts read the whole table, not the filtered view.
    let charts = vec![
        charts::creative_chart(&table, &config.charts),
        charts::engagement_chart(&table, &config.charts)?,
    ];

    Ok(DashboardContent {
        section_title: config.display.section_title.clone(),
        campaigns,
        filtered_rows: view.len(),
        selected_campaign,
        kpis,
        tiles,
        charts,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
