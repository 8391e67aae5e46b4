//! Number formatting and metric tiles.

use serde::Serialize;

use super::kpi::KpiSnapshot;

/// One labelled KPI tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    /// Stable identifier (`impressions`, `clicks`, `ctr`, `spend`, `cpc`, `cpm`).
    pub key: &'static str,
    pub label: &'static str,
    /// Display string, e.g. `1,500`, `3.33%` or `R$ 200.00`.
    pub value: String,
}

/// Build the six tiles, in display order.
pub fn metric_tiles(kpi: &KpiSnapshot, currency_symbol: &str) -> Vec<MetricTile> {
    vec![
        MetricTile {
            key: "impressions",
            label: "Impressões",
            value: format_count(kpi.impressions_total),
        },
        MetricTile {
            key: "clicks",
            label: "Cliques",
            value: format_count(kpi.clicks_total),
        },
        MetricTile {
            key: "ctr",
            label: "CTR",
            value: format_percent(kpi.ctr_percent),
        },
        MetricTile {
            key: "spend",
            label: "Investimento",
            value: format_currency(kpi.spend_total, currency_symbol),
        },
        MetricTile {
            key: "cpc",
            label: "CPC",
            value: format_currency(kpi.cpc, currency_symbol),
        },
        MetricTile {
            key: "cpm",
            label: "CPM",
            value: format_currency(kpi.cpm, currency_symbol),
        },
    ]
}

/// `1234567` → `1,234,567`.
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// `3.3333` → `3.33%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// `1234.5` → `R$ 1,234.50`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{symbol} {sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1500), "1,500");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(3.33333), "3.33%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0), "100.00%");
    }

    #[test]
    fn currency_has_symbol_separators_and_two_decimals() {
        assert_eq!(format_currency(200.0, "R$"), "R$ 200.00");
        assert_eq!(format_currency(133.3333, "R$"), "R$ 133.33");
        assert_eq!(format_currency(1234567.891, "R$"), "R$ 1,234,567.89");
        assert_eq!(format_currency(0.0, "US$"), "US$ 0.00");
        assert_eq!(format_currency(-1500.5, "R$"), "R$ -1,500.50");
    }

    #[test]
    fn tiles_are_in_display_order() {
        let kpi = KpiSnapshot::from_totals(1500, 50, 200.0);
        let tiles = metric_tiles(&kpi, "R$");
        let labels: Vec<&str> = tiles.iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec!["Impressões", "Cliques", "CTR", "Investimento", "CPC", "CPM"]
        );
        let values: Vec<&str> = tiles.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["1,500", "50", "3.33%", "R$ 200.00", "R$ 4.00", "R$ 133.33"]
        );
    }
}
