//! KPI aggregation over a filtered view.

use serde::Serialize;

use crate::data::CampaignRecord;
use crate::data::record::columns;
use crate::error::DashboardError;

/// The six headline numbers of one render.
///
/// Sum fields are additive across campaigns; ratio fields are always
/// derived from the sums of the same snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub impressions_total: u64,
    pub clicks_total: u64,
    /// Click-through rate in percent.
    pub ctr_percent: f64,
    pub spend_total: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
}

impl KpiSnapshot {
    /// Sum a view and derive the ratios. Fails with
    /// [`DashboardError::CountOverflow`] when a count total does not fit.
    pub fn from_records<'a, I>(records: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = &'a CampaignRecord>,
    {
        let (impressions, clicks, spend) = records.into_iter().try_fold(
            (0u64, 0u64, 0.0f64),
            |(i, c, s), r| -> Result<_, DashboardError> {
                Ok((
                    checked_total(i, r.impressions, columns::IMPRESSIONS)?,
                    checked_total(c, r.clicks, columns::CLICKS)?,
                    s + r.spend,
                ))
            },
        )?;
        Ok(Self::from_totals(impressions, clicks, spend))
    }

    /// Derive the ratios from already-summed totals. A zero denominator
    /// yields 0 rather than a division fault.
    pub fn from_totals(impressions_total: u64, clicks_total: u64, spend_total: f64) -> Self {
        let ctr_percent = ratio(clicks_total as f64, impressions_total) * 100.0;
        let cpc = ratio(spend_total, clicks_total);
        let cpm = ratio(spend_total, impressions_total) * 1000.0;

        Self {
            impressions_total,
            clicks_total,
            ctr_percent,
            spend_total,
            cpc,
            cpm,
        }
    }
}

/// Add one cell to a running count total.
pub(crate) fn checked_total(total: u64, value: u64, column: &str) -> Result<u64, DashboardError> {
    total
        .checked_add(value)
        .ok_or_else(|| DashboardError::CountOverflow {
            column: column.to_string(),
        })
}

fn ratio(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(impressions: u64, clicks: u64, spend: f64) -> CampaignRecord {
        CampaignRecord {
            campaign: "X".to_string(),
            creative: "c".to_string(),
            impressions,
            clicks,
            spend,
            saves: 0,
            shares: 0,
            comments: 0,
        }
    }

    #[test]
    fn worked_example() {
        let rows = [record(1000, 50, 200.0), record(500, 0, 0.0)];
        let kpi = KpiSnapshot::from_records(&rows).unwrap();

        assert_eq!(kpi.impressions_total, 1500);
        assert_eq!(kpi.clicks_total, 50);
        assert!((kpi.ctr_percent - 3.3333).abs() < 1e-3);
        assert!((kpi.spend_total - 200.0).abs() < 1e-9);
        assert!((kpi.cpc - 4.0).abs() < 1e-9);
        assert!((kpi.cpm - 133.3333).abs() < 1e-3);
    }

    #[test]
    fn zero_impressions_zero_ctr_and_cpm() {
        let kpi = KpiSnapshot::from_records(&[record(0, 0, 50.0)]).unwrap();
        assert_eq!(kpi.ctr_percent, 0.0);
        assert_eq!(kpi.cpm, 0.0);
        assert_eq!(kpi.cpc, 0.0);
        assert_eq!(kpi.spend_total, 50.0);
    }

    #[test]
    fn zero_clicks_zero_cpc() {
        let kpi = KpiSnapshot::from_records(&[record(2000, 0, 10.0)]).unwrap();
        assert_eq!(kpi.cpc, 0.0);
        assert_eq!(kpi.ctr_percent, 0.0);
        assert!((kpi.cpm - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_view_is_all_zero() {
        let kpi = KpiSnapshot::from_records(std::iter::empty()).unwrap();
        assert_eq!(kpi, KpiSnapshot::default());
    }

    #[test]
    fn overflowing_impressions_fail_instead_of_wrapping() {
        let big = u64::MAX / 2 + 1;
        let rows = [record(big, 1, 1.0), record(big, 1, 1.0)];
        match KpiSnapshot::from_records(&rows) {
            Err(DashboardError::CountOverflow { column }) => assert_eq!(column, "impressoes"),
            other => panic!("expected count overflow, got {other:?}"),
        }
    }

    #[test]
    fn totals_up_to_the_limit_are_kept() {
        let rows = [record(u64::MAX - 1, 0, 0.0), record(1, 0, 0.0)];
        let kpi = KpiSnapshot::from_records(&rows).unwrap();
        assert_eq!(kpi.impressions_total, u64::MAX);
    }
}
