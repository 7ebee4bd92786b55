//! Chart definitions shown in the deck.

use serde::{Deserialize, Serialize};

use crate::utils::format::{format_currency, CRORE};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Opportunity,
    Revenue,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Opportunity, ChartKind::Revenue];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Opportunity => "opportunity",
            ChartKind::Revenue => "revenue",
        }
    }

    /// Slide each chart sits on unless settings say otherwise.
    pub fn default_slide(&self) -> u32 {
        match self {
            ChartKind::Opportunity => 3,
            ChartKind::Revenue => 6,
        }
    }

    pub fn spec(&self) -> ChartSpec {
        match self {
            ChartKind::Opportunity => opportunity_chart(),
            ChartKind::Revenue => revenue_chart(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
    pub filled: bool,
    pub dashed: bool,
}

/// Data handed to the chart provider. Styling beyond colour is the provider's business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Pre-formatted legend entries, one per label or dataset.
    pub legend: Vec<String>,
}

fn opportunity_chart() -> ChartSpec {
    let years = (2024..=2030).map(|year: u32| year.to_string()).collect();
    let market = vec![15000.0, 18500.0, 22000.0, 26500.0, 29000.0, 31000.0, 31500.0];
    let losses = vec![400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0];

    let datasets = vec![
        Dataset {
            label: "PropTech Market Growth (₹ Crores)".into(),
            data: market,
            colors: vec!["#1FB8CD".into()],
            filled: true,
            dashed: false,
        },
        Dataset {
            label: "Competitor Losses (₹ Crores)".into(),
            data: losses,
            colors: vec!["#DB4545".into()],
            filled: false,
            dashed: true,
        },
    ];

    // Legend carries the 2030 value of each series.
    let legend = datasets
        .iter()
        .map(|dataset| {
            let last = dataset.data.last().copied().unwrap_or_default();
            format!("{} {}", dataset.label, format_currency(last * CRORE, "₹", ""))
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Opportunity,
        chart_type: ChartType::Line,
        title: "Market Growth vs Competitor Losses".into(),
        labels: years,
        datasets,
        legend,
    }
}

fn revenue_chart() -> ChartSpec {
    let labels: Vec<String> = [
        "Verification & Certification",
        "Technology Services (AR/VR)",
        "Premium Subscriptions",
        "Transaction Commissions",
        "Corporate Partnerships",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let shares = vec![35.0, 25.0, 20.0, 15.0, 5.0];

    let legend = labels
        .iter()
        .zip(&shares)
        .map(|(label, share)| format!("{label} ({share}%)"))
        .collect();

    ChartSpec {
        kind: ChartKind::Revenue,
        chart_type: ChartType::Doughnut,
        title: "Revenue Stream Distribution - High Margin Model".into(),
        labels,
        datasets: vec![Dataset {
            label: "Revenue share".into(),
            data: shares,
            colors: ["#1FB8CD", "#FFC185", "#B4413C", "#5D878F", "#DB4545"]
                .into_iter()
                .map(String::from)
                .collect(),
            filled: true,
            dashed: false,
        }],
        legend,
    }
}
