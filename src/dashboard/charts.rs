//! Declarative chart descriptions.
//!
//! A [`ChartSpec`] carries everything the frontend needs to draw a bar
//! chart: mark, axis encodings, colour channel, tooltip fields, fixed size
//! and the data points. Both charts are built from the whole table, not the
//! filtered view.

use std::cmp::Ordering;

use serde::Serialize;

use super::kpi::checked_total;
use crate::config::schema::ChartsConfig;
use crate::data::CampaignTable;
use crate::data::record::columns;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Bars grow along the x axis; categories on y.
    Horizontal,
    /// Bars grow along the y axis; categories on x.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarMark {
    pub orientation: Orientation,
    /// Bar thickness in pixels.
    pub size: u32,
    /// Bars sharing a category are stacked instead of grouped.
    pub stacked: bool,
}

/// Which datum field an encoding reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Category,
    Series,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Nominal,
    Quantitative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub field: Field,
    pub field_type: FieldType,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEncoding {
    pub field: Field,
    /// `None` hides the legend.
    pub legend_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipField {
    pub field: Field,
    pub label: String,
}

/// One bar: a category (axis position), a series (colour) and a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDatum {
    pub category: String,
    pub series: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub mark: BarMark,
    pub x: Encoding,
    pub y: Encoding,
    pub color: ColorEncoding,
    pub tooltip: Vec<TooltipField>,
    pub width: u32,
    pub height: u32,
    /// Data points in display order.
    pub data: Vec<ChartDatum>,
}

// ---------------------------------------------------------------------------
// Creative chart
// ---------------------------------------------------------------------------

pub const CREATIVE_CHART_TITLE: &str = "Criativo com maior Investimento e Impressões";

/// Spend and impressions per creative, as horizontal grouped bars.
///
/// The table is reshaped to long form (one datum per creative × metric,
/// rows of the same creative summed). Creatives are ordered by the sum of
/// their bars, largest first; ties keep first-seen order.
pub fn creative_chart(table: &CampaignTable, size: &ChartsConfig) -> ChartSpec {
    let mut creatives: Vec<(String, f64, f64)> = Vec::new();
    for r in table.records() {
        match creatives.iter_mut().find(|(name, _, _)| *name == r.creative) {
            Some((_, spend, impressions)) => {
                *spend += r.spend;
                *impressions += r.impressions as f64;
            }
            None => creatives.push((r.creative.clone(), r.spend, r.impressions as f64)),
        }
    }

    creatives.sort_by(|a, b| descending(a.1 + a.2, b.1 + b.2));

    let data = creatives
        .into_iter()
        .flat_map(|(creative, spend, impressions)| {
            [
                ChartDatum {
                    category: creative.clone(),
                    series: columns::SPEND.to_string(),
                    value: spend,
                },
                ChartDatum {
                    category: creative,
                    series: columns::IMPRESSIONS.to_string(),
                    value: impressions,
                },
            ]
        })
        .collect();

    ChartSpec {
        id: "creatives",
        title: CREATIVE_CHART_TITLE.to_string(),
        mark: BarMark {
            orientation: Orientation::Horizontal,
            size: 20,
            stacked: false,
        },
        x: Encoding {
            field: Field::Value,
            field_type: FieldType::Quantitative,
            title: "valor".to_string(),
        },
        y: Encoding {
            field: Field::Category,
            field_type: FieldType::Nominal,
            title: "Criativos".to_string(),
        },
        color: ColorEncoding {
            field: Field::Series,
            legend_title: Some("métrica".to_string()),
        },
        tooltip: vec![
            TooltipField {
                field: Field::Category,
                label: "criativos".to_string(),
            },
            TooltipField {
                field: Field::Series,
                label: "métrica".to_string(),
            },
            TooltipField {
                field: Field::Value,
                label: "valor".to_string(),
            },
        ],
        width: size.width,
        height: size.height,
        data,
    }
}

// ---------------------------------------------------------------------------
// Engagement chart
// ---------------------------------------------------------------------------

pub const ENGAGEMENT_CHART_TITLE: &str =
    "Gráfico de Colunas Empilhadas: Salvar, Compartilhar, Comentar";

/// Totals of saves, shares and comments, as vertical bars sorted ascending.
pub fn engagement_chart(
    table: &CampaignTable,
    size: &ChartsConfig,
) -> Result<ChartSpec, DashboardError> {
    let (saves, shares, comments) = table.records().iter().try_fold(
        (0u64, 0u64, 0u64),
        |(sv, sh, cm), r| -> Result<_, DashboardError> {
            Ok((
                checked_total(sv, r.saves, columns::SAVES)?,
                checked_total(sh, r.shares, columns::SHARES)?,
                checked_total(cm, r.comments, columns::COMMENTS)?,
            ))
        },
    )?;

    let mut totals = [
        (columns::SAVES, saves as f64),
        (columns::SHARES, shares as f64),
        (columns::COMMENTS, comments as f64),
    ];
    totals.sort_by(|a, b| a.1.total_cmp(&b.1));

    let data = totals
        .into_iter()
        .map(|(metric, value)| ChartDatum {
            category: metric.to_string(),
            series: metric.to_string(),
            value,
        })
        .collect();

    Ok(ChartSpec {
        id: "engagement",
        title: ENGAGEMENT_CHART_TITLE.to_string(),
        mark: BarMark {
            orientation: Orientation::Vertical,
            size: 50,
            stacked: true,
        },
        x: Encoding {
            field: Field::Category,
            field_type: FieldType::Nominal,
            title: "Métricas".to_string(),
        },
        y: Encoding {
            field: Field::Value,
            field_type: FieldType::Quantitative,
            title: "Quantidade".to_string(),
        },
        color: ColorEncoding {
            field: Field::Series,
            legend_title: Some("Ações".to_string()),
        },
        tooltip: Vec::new(),
        width: size.width,
        height: size.height,
        data,
    })
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CampaignRecord;

    fn record(campaign: &str, creative: &str, impressions: u64, spend: f64) -> CampaignRecord {
        CampaignRecord {
            campaign: campaign.to_string(),
            creative: creative.to_string(),
            impressions,
            clicks: 0,
            spend,
            saves: 1,
            shares: 2,
            comments: 3,
        }
    }

    #[test]
    fn creative_chart_is_long_form_sorted_descending() {
        let table = CampaignTable::new(vec![
            record("A", "small", 100, 10.0),
            record("B", "big", 900, 50.0),
            record("A", "small", 50, 5.0),
            record("B", "mid", 400, 20.0),
        ]);
        let chart = creative_chart(&table, &ChartsConfig::default());

        let order: Vec<&str> = chart
            .data
            .iter()
            .step_by(2)
            .map(|d| d.category.as_str())
            .collect();
        assert_eq!(order, vec!["big", "mid", "small"]);

        assert_eq!(chart.data.len(), 6);
        let small_spend = chart
            .data
            .iter()
            .find(|d| d.category == "small" && d.series == "investimento")
            .unwrap();
        assert!((small_spend.value - 15.0).abs() < 1e-9);
        let small_impr = chart
            .data
            .iter()
            .find(|d| d.category == "small" && d.series == "impressoes")
            .unwrap();
        assert_eq!(small_impr.value, 150.0);
    }

    #[test]
    fn creative_chart_shape() {
        let chart = creative_chart(&CampaignTable::default(), &ChartsConfig::default());
        assert_eq!(chart.title, CREATIVE_CHART_TITLE);
        assert_eq!(chart.mark.orientation, Orientation::Horizontal);
        assert_eq!(chart.mark.size, 20);
        assert_eq!((chart.width, chart.height), (400, 300));
        assert_eq!(chart.y.field, Field::Category);
        assert_eq!(chart.tooltip.len(), 3);
        assert!(chart.data.is_empty());
    }

    #[test]
    fn engagement_chart_sums_whole_table_ascending() {
        let mut rows = vec![
            record("A", "a", 0, 0.0),
            record("B", "b", 0, 0.0),
        ];
        rows[1].saves = 10;
        let chart = engagement_chart(&CampaignTable::new(rows), &ChartsConfig::default()).unwrap();

        let pairs: Vec<(&str, f64)> = chart
            .data
            .iter()
            .map(|d| (d.category.as_str(), d.value))
            .collect();
        assert_eq!(
            pairs,
            vec![("compartilharam", 4.0), ("comentaram", 6.0), ("salvaram", 11.0)]
        );
        assert_eq!(chart.mark.orientation, Orientation::Vertical);
        assert_eq!(chart.color.legend_title.as_deref(), Some("Ações"));
    }

    #[test]
    fn engagement_ties_keep_declaration_order() {
        let chart = engagement_chart(&CampaignTable::default(), &ChartsConfig::default()).unwrap();
        let order: Vec<&str> = chart.data.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(order, vec!["salvaram", "compartilharam", "comentaram"]);
    }

    #[test]
    fn spec_serializes_with_snake_case_enums() {
        let chart = engagement_chart(&CampaignTable::default(), &ChartsConfig::default()).unwrap();
        let json = serde_json::to_string(&chart).unwrap();
        assert!(json.contains("\"orientation\":\"vertical\""));
        assert!(json.contains("\"field\":\"category\""));
        assert!(json.contains("\"field_type\":\"quantitative\""));
    }

    #[test]
    fn engagement_overflow_names_the_column() {
        let mut rows = vec![record("A", "a", 0, 0.0), record("B", "b", 0, 0.0)];
        rows[0].comments = u64::MAX;
        match engagement_chart(&CampaignTable::new(rows), &ChartsConfig::default()) {
            Err(DashboardError::CountOverflow { column }) => assert_eq!(column, "comentaram"),
            other => panic!("expected count overflow, got {other:?}"),
        }
    }
}
