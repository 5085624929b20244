//! Static summary table: configured `mean ± sd` per cohort plus the
//! p-value label of the marker's annotation.

use serde::{Deserialize, Serialize};

use crate::catalog::MarkerCatalog;
use crate::domain::Cohort;

/// Label shown for markers without a significance annotation.
pub const NOT_SIGNIFICANT: &str = "ns";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub marker: String,
    pub group: Option<String>,
    /// `mean ± sd` strings in cohort order.
    pub cells: [String; 3],
    pub p_value: String,
}

pub fn summary_rows(catalog: &MarkerCatalog) -> Vec<SummaryRow> {
    catalog
        .iter()
        .map(|spec| SummaryRow {
            marker: spec.name.clone(),
            group: spec.group.clone(),
            cells: Cohort::ALL.map(|c| {
                let p = spec.params(c);
                format!("{:.2} ± {:.2}", p.mean, p.sd)
            }),
            p_value: spec
                .annotation
                .as_ref()
                .map_or_else(|| NOT_SIGNIFICANT.to_string(), |a| a.label.clone()),
        })
        .collect()
}

/// Column headers: marker, one per cohort, p-value.
pub fn headers() -> [&'static str; 5] {
    [
        "Marker",
        Cohort::CmvNegative.label(),
        Cohort::CmvPositive.label(),
        Cohort::Case.label(),
        "p",
    ]
}

pub fn to_markdown(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    let h = headers();
    out.push_str(&format!("| {} |\n", h.join(" | ")));
    out.push_str(&format!("|{}\n", "---|".repeat(h.len())));
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.marker, row.cells[0], row.cells[1], row.cells[2], row.p_value
        ));
    }
    out
}
