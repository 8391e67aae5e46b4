//! Campaign metrics dashboard: selection, KPIs, charts and the page model.

pub mod charts;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod page;

pub use charts::ChartSpec;
pub use filter::{FilteredView, RenderContext};
pub use format::MetricTile;
pub use kpi::KpiSnapshot;
pub use page::{DashboardContent, PageModel, StatusLevel, StatusLine, render};
