//! Data ingestion: workbook loading, header normalization and the typed
//! campaign table.
//!
//! The flow is always `TableSource::load` → [`normalize::normalize_headers`]
//! → [`record::CampaignTable::from_raw`]. Nothing here is cached; a render
//! re-reads the source from scratch.

pub mod loader;
pub mod normalize;
pub mod record;

pub use loader::{RawTable, TableSource, WorkbookSource};
pub use record::{CampaignRecord, CampaignTable};

use crate::error::DashboardError;

/// Load, normalize and type-check a table in one step.
pub fn load_table(source: &dyn TableSource) -> Result<CampaignTable, DashboardError> {
    let raw = source.load()?;
    let raw = normalize::normalize_headers(raw);
    CampaignTable::from_raw(&raw)
}
