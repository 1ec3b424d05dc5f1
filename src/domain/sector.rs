//! Sector exposure and diversification scoring.
//!
//! Sector assignment is a keyword match on the ticker symbol itself — a
//! knowingly crude stand-in for real sector reference data. Treat the output
//! as a rough concentration signal, not classification truth.

use serde::Serialize;

use crate::domain::portfolio::ValuedPosition;

const TECH_KEYWORDS: [&str; 5] = ["TECH", "SOFT", "DATA", "SEMI", "CYBER"];
const HEALTHCARE_KEYWORDS: [&str; 5] = ["BIO", "PHARM", "DRUG", "GENE", "THER"];
const ENERGY_KEYWORDS: [&str; 5] = ["OIL", "GAS", "ENERGY", "SOLAR", "WIND"];

pub const SECTORS: [&str; 4] = ["Technology", "Healthcare", "Energy", "Other"];
const CONCENTRATION_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorExposure {
    pub sector: String,
    pub value: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAnalysis {
    pub exposure: Vec<SectorExposure>,
    pub diversification_score: f64,
    pub recommendations: Vec<String>,
}

fn classify(ticker: &str) -> &'static str {
    let upper = ticker.to_uppercase();
    if TECH_KEYWORDS.iter().any(|k| upper.contains(k)) {
        "Technology"
    } else if HEALTHCARE_KEYWORDS.iter().any(|k| upper.contains(k)) {
        "Healthcare"
    } else if ENERGY_KEYWORDS.iter().any(|k| upper.contains(k)) {
        "Energy"
    } else {
        "Other"
    }
}

/// Value-weighted sector breakdown over the fixed sector set.
pub fn analyze_sectors(positions: &[ValuedPosition]) -> SectorAnalysis {
    if positions.is_empty() {
        return SectorAnalysis {
            exposure: Vec::new(),
            diversification_score: 0.0,
            recommendations: vec!["No positions to analyze".to_string()],
        };
    }

    let mut values = [0.0_f64; SECTORS.len()];
    for pos in positions {
        let sector = classify(&pos.ticker);
        let idx = SECTORS.iter().position(|&s| s == sector).unwrap_or(3);
        values[idx] += pos.current_value;
    }

    let total: f64 = values.iter().sum();
    let percents: Vec<f64> = values
        .iter()
        .map(|&v| if total > 0.0 { v / total * 100.0 } else { 0.0 })
        .collect();

    let exposure: Vec<SectorExposure> = SECTORS
        .iter()
        .zip(values.iter().zip(percents.iter()))
        .map(|(&sector, (&value, &percent))| SectorExposure {
            sector: sector.to_string(),
            value,
            percent,
        })
        .collect();

    let diversification_score = if total > 0.0 {
        diversification_score(&percents)
    } else {
        0.0
    };

    let recommendations = recommendations(&exposure);
    SectorAnalysis {
        exposure,
        diversification_score,
        recommendations,
    }
}

/// 0-100 from the Herfindahl-Hirschman index over sector weights, scaled so
/// full concentration scores 0 and an even split across every sector scores
/// 100.
pub fn diversification_score(percents: &[f64]) -> f64 {
    if percents.is_empty() {
        return 0.0;
    }

    let hhi: f64 = percents.iter().map(|p| (p / 100.0).powi(2)).sum();
    let max_hhi = 1.0;
    let min_hhi = 1.0 / percents.len() as f64;
    if (max_hhi - min_hhi).abs() < f64::EPSILON {
        return 100.0;
    }

    ((max_hhi - hhi) / (max_hhi - min_hhi) * 100.0).clamp(0.0, 100.0)
}

fn recommendations(exposure: &[SectorExposure]) -> Vec<String> {
    let mut recs = Vec::new();

    for slice in exposure {
        if slice.percent > CONCENTRATION_PERCENT {
            recs.push(format!(
                "High concentration in {} ({:.1}%) - consider diversifying",
                slice.sector, slice.percent
            ));
        } else if slice.percent == 0.0 && slice.sector != "Other" {
            recs.push(format!(
                "No exposure to {} - consider adding positions",
                slice.sector
            ));
        }
    }

    if recs.is_empty() {
        recs.push("Portfolio shows reasonable sector diversification".to_string());
    }
    recs
}
