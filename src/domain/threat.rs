//! Pest and disease reference data and inspection risk assessment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatType {
    Pest,
    Disease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl RiskLevel {
    pub fn score(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}' (expected low, moderate or high)")),
        }
    }
}

/// Catalogued pest or disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub threat_type: ThreatType,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub description: String,
}

impl Threat {
    /// Stored slug, or one derived from the name.
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

/// Lowercase ASCII words joined by hyphens.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Overall risk for a recorded inspection.
///
/// A linked catalogue threat decides on its own. Otherwise the legacy pest
/// and disease findings are scored (low 1, moderate 2, high 3) and summed.
pub fn assess_inspection_risk(
    threat: Option<RiskLevel>,
    pest: Option<RiskLevel>,
    disease: Option<RiskLevel>,
) -> RiskLevel {
    if let Some(level) = threat {
        return level;
    }
    let total = pest.map_or(0, |r| r.score()) + disease.map_or(0, |r| r.score());
    match total {
        0..=2 => RiskLevel::Low,
        3 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    }
}
