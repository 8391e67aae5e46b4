//! Session state for the dashboard server.
//!
//! The server handles requests one at a time and owns a single
//! [`DashboardSession`]. Each action updates the stored selection (or
//! clears it) and then runs a full render.

use crate::config::DashboardConfig;
use crate::dashboard::{self, PageModel, RenderContext};
use crate::data::TableSource;

#[derive(Debug, Default)]
pub struct DashboardSession {
    context: RenderContext,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Render with the current selection.
    pub fn page(&self, source: &dyn TableSource, config: &DashboardConfig) -> PageModel {
        dashboard::render(source, &self.context, config)
    }

    /// Store a new selection, then render.
    pub fn select(
        &mut self,
        campaign: &str,
        source: &dyn TableSource,
        config: &DashboardConfig,
    ) -> PageModel {
        tracing::debug!(campaign, "campaign selected");
        self.context.select(campaign);
        self.page(source, config)
    }

    /// Clear the selection, then render from scratch.
    pub fn reset(&mut self, source: &dyn TableSource, config: &DashboardConfig) -> PageModel {
        tracing::debug!("selection reset");
        self.context.reset();
        self.page(source, config)
    }
}

#[cfg(test)]
mod tests {
    use calamine::Data;

    use super::*;
    use crate::data::RawTable;

    fn sheet() -> RawTable {
        let s = |v: &str| Data::String(v.to_string());
        let n = Data::Float;
        RawTable::from_rows(vec![
            vec![
                s("nome_campanha"),
                s("criativos"),
                s("impressoes"),
                s("cliques"),
                s("investimento"),
                s("salvaram"),
                s("compartilharam"),
                s("comentaram"),
            ],
            vec![s("A"), s("a"), n(100.0), n(5.0), n(10.0), n(0.0), n(0.0), n(0.0)],
            vec![s("B"), s("b"), n(400.0), n(8.0), n(40.0), n(0.0), n(0.0), n(0.0)],
        ])
        .unwrap()
    }

    #[test]
    fn select_then_reset_restores_default_render() {
        let config = DashboardConfig::default();
        let source = sheet();
        let mut session = DashboardSession::new();

        let default_page = session.page(&source, &config);

        let selected = session.select("B", &source, &config);
        assert_eq!(selected.content.as_ref().unwrap().selected_campaign, "B");
        assert_ne!(selected, default_page);

        let reset = session.reset(&source, &config);
        assert_eq!(session.context(), &RenderContext::default());
        assert_eq!(reset, default_page);
        assert_eq!(reset.content.unwrap().selected_campaign, "A");
    }

    #[test]
    fn selection_persists_across_renders() {
        let config = DashboardConfig::default();
        let source = sheet();
        let mut session = DashboardSession::new();

        session.select("B", &source, &config);
        let page = session.page(&source, &config);
        assert_eq!(page.content.unwrap().kpis.impressions_total, 400);
    }
}
