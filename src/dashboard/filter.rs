//! Campaign selection and the filtered view.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::data::{CampaignRecord, CampaignTable};
use crate::error::DashboardError;

/// Per-session state carried into each render.
///
/// The only field is the campaign chosen in the selector. `None` means "use
/// the default", which is the first campaign in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub selected_campaign: Option<String>,
}

impl RenderContext {
    pub fn with_selection(campaign: impl Into<String>) -> Self {
        Self {
            selected_campaign: Some(campaign.into()),
        }
    }

    pub fn select(&mut self, campaign: impl Into<String>) {
        self.selected_campaign = Some(campaign.into());
    }

    /// Forget the stored selection.
    pub fn reset(&mut self) {
        self.selected_campaign = None;
    }
}

/// Distinct campaign names in first-seen order.
pub fn campaign_names(table: &CampaignTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .filter(|r| seen.insert(r.campaign.as_str()))
        .map(|r| r.campaign.clone())
        .collect()
}

/// Pick the campaign to filter on.
///
/// A stored selection that is not among `names` (the workbook changed
/// between renders) falls back to the default.
pub fn resolve_selection(
    ctx: &RenderContext,
    names: &[String],
) -> Result<String, DashboardError> {
    let default = names.first().ok_or(DashboardError::NoCampaigns)?;

    match &ctx.selected_campaign {
        Some(selected) if names.contains(selected) => Ok(selected.clone()),
        Some(stale) => {
            tracing::info!(campaign = %stale, "stored selection no longer present, using default");
            Ok(default.clone())
        }
        None => Ok(default.clone()),
    }
}

/// The records of one campaign, borrowed from the table.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub campaign: String,
    pub records: Vec<&'a CampaignRecord>,
}

impl FilteredView<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn filter_by_campaign<'a>(table: &'a CampaignTable, campaign: &str) -> FilteredView<'a> {
    FilteredView {
        campaign: campaign.to_string(),
        records: table
            .records()
            .iter()
            .filter(|r| r.campaign == campaign)
            .collect(),
    }
}
