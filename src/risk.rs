use std::collections::HashMap;

use crate::models::{PredictionResult, RiskLevel, RiskLevelSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskIcon {
    Check,
    Alert,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskScheme {
    pub color: RiskColor,
    pub icon: RiskIcon,
}

impl RiskColor {
    pub fn name(self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Red => "red",
            RiskColor::Gray => "gray",
        }
    }
}

impl RiskIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            RiskIcon::Check => "[ok]",
            RiskIcon::Alert => "[!]",
            RiskIcon::Warning => "[!!]",
        }
    }
}

pub fn scheme_for(level: RiskLevel) -> RiskScheme {
    match level {
        RiskLevel::Low => RiskScheme {
            color: RiskColor::Green,
            icon: RiskIcon::Check,
        },
        RiskLevel::Medium => RiskScheme {
            color: RiskColor::Yellow,
            icon: RiskIcon::Alert,
        },
        RiskLevel::High => RiskScheme {
            color: RiskColor::Red,
            icon: RiskIcon::Warning,
        },
        RiskLevel::Unrecognized => RiskScheme {
            color: RiskColor::Gray,
            icon: RiskIcon::Alert,
        },
    }
}

/// Counts results per level, most severe first.
pub fn summarize_by_level(results: &[PredictionResult]) -> Vec<RiskLevelSummary> {
    let mut map: HashMap<RiskLevel, (usize, f64)> = HashMap::new();

    for result in results {
        let entry = map.entry(result.risk_level).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += result.risk_score;
    }

    let mut summaries: Vec<RiskLevelSummary> = map
        .into_iter()
        .map(|(risk_level, (count, total_score))| RiskLevelSummary {
            risk_level,
            count,
            avg_score: if count == 0 {
                0.0
            } else {
                total_score / count as f64
            },
        })
        .collect();

    summaries.sort_by_key(|summary| severity_rank(summary.risk_level));
    summaries
}

fn severity_rank(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::High => 0,
        RiskLevel::Medium => 1,
        RiskLevel::Low => 2,
        RiskLevel::Unrecognized => 3,
    }
}
