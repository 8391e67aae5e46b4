//! Typed campaign records.
//!
//! A [`CampaignTable`] is built once per render from a normalized
//! [`RawTable`]. Column lookups happen here and only here: every required
//! column is checked up front, so later stages work on named fields and
//! never fail on a missing key.

use calamine::Data;
use serde::Serialize;

use super::loader::RawTable;
use crate::error::{DashboardError, LoadError};

/// Canonical (post-normalization) column names.
pub mod columns {
    pub const CAMPAIGN: &str = "nome_campanha";
    pub const CREATIVE: &str = "criativos";
    pub const IMPRESSIONS: &str = "impressoes";
    pub const CLICKS: &str = "cliques";
    pub const SPEND: &str = "investimento";
    pub const SAVES: &str = "salvaram";
    pub const SHARES: &str = "compartilharam";
    pub const COMMENTS: &str = "comentaram";

    /// Every column a record needs, in the order missing ones are reported.
    pub const REQUIRED: [&str; 8] = [
        CAMPAIGN,
        CREATIVE,
        IMPRESSIONS,
        CLICKS,
        SPEND,
        SAVES,
        SHARES,
        COMMENTS,
    ];
}

/// One row of the campaign export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    pub campaign: String,
    pub creative: String,
    pub impressions: u64,
    pub clicks: u64,
    /// Spend in the account currency.
    pub spend: f64,
    pub saves: u64,
    pub shares: u64,
    pub comments: u64,
}

/// Ordered, read-only collection of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignTable {
    records: Vec<CampaignRecord>,
}

/// Column positions resolved once per table.
struct ColumnMap {
    campaign: usize,
    creative: usize,
    impressions: usize,
    clicks: usize,
    spend: usize,
    saves: usize,
    shares: usize,
    comments: usize,
}

impl ColumnMap {
    fn resolve(raw: &RawTable) -> Result<Self, DashboardError> {
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|name| raw.column_index(name).is_none())
            .map(|name| (*name).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DashboardError::MissingColumns { columns: missing });
        }

        // Presence was checked above.
        let idx = |name: &str| raw.column_index(name).unwrap_or_default();
        Ok(Self {
            campaign: idx(columns::CAMPAIGN),
            creative: idx(columns::CREATIVE),
            impressions: idx(columns::IMPRESSIONS),
            clicks: idx(columns::CLICKS),
            spend: idx(columns::SPEND),
            saves: idx(columns::SAVES),
            shares: idx(columns::SHARES),
            comments: idx(columns::COMMENTS),
        })
    }
}

static EMPTY_CELL: Data = Data::Empty;

impl CampaignTable {
    pub fn new(records: Vec<CampaignRecord>) -> Self {
        Self { records }
    }

    /// Type-check a normalized raw table.
    ///
    /// Fails with [`DashboardError::MissingColumns`] naming every absent
    /// required column, or with [`LoadError::InvalidCell`] for the first
    /// numeric cell that is not a non-negative number. Empty numeric cells
    /// count as zero.
    pub fn from_raw(raw: &RawTable) -> Result<Self, DashboardError> {
        let cols = ColumnMap::resolve(raw)?;

        let mut records = Vec::with_capacity(raw.rows.len());
        for (i, row) in raw.rows.iter().enumerate() {
            // Header is sheet row 1.
            let sheet_row = i + 2;
            let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY_CELL);

            records.push(CampaignRecord {
                campaign: text_cell(cell(cols.campaign)),
                creative: text_cell(cell(cols.creative)),
                impressions: count_cell(cell(cols.impressions), sheet_row, columns::IMPRESSIONS)?,
                clicks: count_cell(cell(cols.clicks), sheet_row, columns::CLICKS)?,
                spend: amount_cell(cell(cols.spend), sheet_row, columns::SPEND)?,
                saves: count_cell(cell(cols.saves), sheet_row, columns::SAVES)?,
                shares: count_cell(cell(cols.shares), sheet_row, columns::SHARES)?,
                comments: count_cell(cell(cols.comments), sheet_row, columns::COMMENTS)?,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CampaignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// Label cells are kept verbatim: `"X "` and `"X"` are different campaigns.
fn text_cell(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn invalid(cell: &Data, row: usize, column: &str) -> LoadError {
    LoadError::InvalidCell {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    }
}

/// Non-negative whole number; empty → 0.
fn count_cell(cell: &Data, row: usize, column: &str) -> Result<u64, LoadError> {
    let value = match cell {
        Data::Empty => Some(0),
        Data::Int(i) => u64::try_from(*i).ok(),
        Data::Float(f) => whole_number(*f),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0)
            } else {
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
            }
        }
        _ => None,
    };
    value.ok_or_else(|| invalid(cell, row, column))
}

fn whole_number(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

/// Non-negative decimal amount; empty → 0.
fn amount_cell(cell: &Data, row: usize, column: &str) -> Result<f64, LoadError> {
    let value = match cell {
        Data::Empty => Some(0.0),
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() { Some(0.0) } else { s.parse::<f64>().ok() }
        }
        _ => None,
    };
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| invalid(cell, row, column))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn headers() -> Vec<String> {
        columns::REQUIRED.iter().map(|c| c.to_string()).collect()
    }

    fn raw(rows: Vec<Vec<Data>>) -> RawTable {
        RawTable {
            headers: headers(),
            rows,
        }
    }

    #[test]
    fn builds_typed_records() {
        let table = CampaignTable::from_raw(&raw(vec![vec![
            s("Black Friday"),
            s(" Video 01 "),
            Data::Float(1000.0),
            Data::Int(50),
            Data::Float(200.5),
            Data::Float(3.0),
            s("2"),
            Data::Empty,
        ]]))
        .unwrap();

        assert_eq!(table.len(), 1);
        let r = &table.records()[0];
        assert_eq!(r.campaign, "Black Friday");
        assert_eq!(r.creative, " Video 01 ");
        assert_eq!(r.impressions, 1000);
        assert_eq!(r.clicks, 50);
        assert!((r.spend - 200.5).abs() < 1e-9);
        assert_eq!(r.saves, 3);
        assert_eq!(r.shares, 2);
        assert_eq!(r.comments, 0);
    }

    #[test]
    fn short_rows_fill_with_zero() {
        let table = CampaignTable::from_raw(&raw(vec![vec![s("X"), s("C1")]])).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.impressions, 0);
        assert_eq!(r.spend, 0.0);
    }

    #[test]
    fn reports_every_missing_column() {
        let mut table = raw(Vec::new());
        table
            .headers
            .retain(|h| h != columns::SAVES && h != columns::COMMENTS);

        match CampaignTable::from_raw(&table) {
            Err(DashboardError::MissingColumns { columns }) => {
                assert_eq!(columns, vec!["salvaram", "comentaram"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_counts() {
        let err = CampaignTable::from_raw(&raw(vec![vec![
            s("X"),
            s("C"),
            Data::Int(-5),
        ]]))
        .unwrap_err();
        match err {
            DashboardError::Load(LoadError::InvalidCell { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "impressoes");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_fractional_counts_and_text() {
        assert!(count_cell(&Data::Float(1.5), 2, "cliques").is_err());
        assert!(count_cell(&s("muitos"), 2, "cliques").is_err());
        assert!(count_cell(&Data::Bool(true), 2, "cliques").is_err());
        assert_eq!(count_cell(&s(" 42 "), 2, "cliques").unwrap(), 42);
        assert_eq!(count_cell(&s("42.0"), 2, "cliques").unwrap(), 42);
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_text() {
        assert_eq!(amount_cell(&Data::Int(3), 2, "investimento").unwrap(), 3.0);
        assert_eq!(amount_cell(&s("12.25"), 2, "investimento").unwrap(), 12.25);
        assert_eq!(amount_cell(&s(""), 2, "investimento").unwrap(), 0.0);
        assert!(amount_cell(&Data::Float(-1.0), 2, "investimento").is_err());
        assert!(amount_cell(&s("R$ 10"), 2, "investimento").is_err());
    }

    #[test]
    fn numeric_campaign_names_are_text() {
        assert_eq!(text_cell(&Data::Float(2024.0)), "2024");
        assert_eq!(text_cell(&Data::Int(7)), "7");
        assert_eq!(text_cell(&Data::Empty), "");
    }

    #[test]
    fn label_whitespace_is_significant() {
        let blank = || Data::Empty;
        let table = CampaignTable::from_raw(&raw(vec![
            vec![s("X"), s("a"), blank(), blank(), blank(), blank(), blank(), blank()],
            vec![s("X "), s("a"), blank(), blank(), blank(), blank(), blank(), blank()],
        ]))
        .unwrap();
        let names: Vec<&str> = table.records().iter().map(|r| r.campaign.as_str()).collect();
        assert_eq!(names, vec!["X", "X "]);
        assert_ne!(table.records()[0].campaign, table.records()[1].campaign);
    }
}
