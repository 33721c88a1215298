//! Analysis output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of analysis requested for a filing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Financial and negative covenants.
    Covenant,
    /// Corporate and guarantor structure.
    Subsidiary,
    /// Debt facilities and their obligors.
    DebtStructure,
    /// General financial health.
    #[default]
    General,
}

impl AnalysisType {
    /// Parses an analysis type; unknown values select [`AnalysisType::General`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "covenant" => Self::Covenant,
            "subsidiary" => Self::Subsidiary,
            "debt_structure" => Self::DebtStructure,
            _ => Self::General,
        }
    }

    /// Returns the wire name of this analysis type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Covenant => "covenant",
            Self::Subsidiary => "subsidiary",
            Self::DebtStructure => "debt_structure",
            Self::General => "general",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Result of a filing analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilingAnalysis {
    /// Covenant analysis.
    Covenant(CovenantAnalysis),
    /// Subsidiary analysis.
    Subsidiary(SubsidiaryAnalysis),
    /// Debt structure analysis.
    DebtStructure(DebtStructureAnalysis),
    /// General analysis.
    General(GeneralAnalysis),
}

impl FilingAnalysis {
    /// Ticker the analysis was produced for.
    #[must_use]
    pub fn ticker(&self) -> &str {
        match self {
            Self::Covenant(a) => &a.ticker,
            Self::Subsidiary(a) => &a.ticker,
            Self::DebtStructure(a) => &a.ticker,
            Self::General(a) => &a.ticker,
        }
    }

    /// Confidence reported by the analyzer, in `[0, 1]`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Covenant(a) => a.analysis_confidence,
            Self::Subsidiary(a) => a.analysis_confidence,
            Self::DebtStructure(a) => a.analysis_confidence,
            Self::General(a) => a.analysis_confidence,
        }
    }
}

/// A maintenance covenant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct FinancialCovenant {
    pub name: String,
    pub threshold: String,
    pub description: String,
    pub testing_frequency: String,
    pub source_section: String,
}

/// A restriction on company actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct NegativeCovenant {
    pub restriction: String,
    pub description: String,
    pub source_section: String,
}

/// Covenants found in a filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CovenantAnalysis {
    pub covenants_found: bool,
    pub financial_covenants: Vec<FinancialCovenant>,
    pub negative_covenants: Vec<NegativeCovenant>,
    pub analysis_confidence: f64,
    pub extraction_method: String,
    pub ticker: String,
}

/// A legal entity in the corporate structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Entity {
    pub name: String,
    pub jurisdiction: String,
    pub entity_type: String,
}

/// A subsidiary of the parent company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Subsidiary {
    pub name: String,
    pub jurisdiction: String,
    pub ownership_percentage: String,
    pub entity_type: String,
    pub is_guarantor: bool,
    pub significant_assets: String,
}

/// Which subsidiaries guarantee the parent's debt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct GuaranteeStructure {
    pub guarantor_subsidiaries: Vec<String>,
    pub non_guarantor_subsidiaries: Vec<String>,
    pub guarantee_type: String,
}

/// Corporate structure found in a filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SubsidiaryAnalysis {
    pub subsidiaries_found: bool,
    pub parent_company: Entity,
    pub subsidiaries: Vec<Subsidiary>,
    pub guarantee_structure: GuaranteeStructure,
    pub analysis_confidence: f64,
    pub extraction_method: String,
    pub ticker: String,
}

/// A loan or credit facility.
///
/// Term loans report `amount`; revolvers report `commitment` and
/// `outstanding`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DebtFacility {
    pub facility_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding: Option<String>,
    pub maturity: String,
    pub interest_rate: String,
    pub security: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guarantors: Option<Vec<String>>,
}

/// Debt found in a filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DebtStructureAnalysis {
    pub debt_found: bool,
    pub total_debt: String,
    pub debt_breakdown: Vec<DebtFacility>,
    pub debt_by_entity: BTreeMap<String, String>,
    pub analysis_confidence: f64,
    pub extraction_method: String,
    pub ticker: String,
}

/// Headline assessment of a company's financials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct FinancialHighlights {
    pub revenue_trend: String,
    pub profitability: String,
    pub liquidity: String,
    pub leverage: String,
}

/// General financial analysis of a filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct GeneralAnalysis {
    pub analysis_complete: bool,
    pub financial_highlights: FinancialHighlights,
    pub key_risks: Vec<String>,
    pub distress_indicators: Vec<String>,
    pub analysis_confidence: f64,
    pub extraction_method: String,
    pub ticker: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_type_parse() {
        assert_eq!(AnalysisType::parse("covenant"), AnalysisType::Covenant);
        assert_eq!(AnalysisType::parse("subsidiary"), AnalysisType::Subsidiary);
        assert_eq!(AnalysisType::parse("debt_structure"), AnalysisType::DebtStructure);
        assert_eq!(AnalysisType::parse("anything"), AnalysisType::General);
        assert_eq!(AnalysisType::parse("Covenant"), AnalysisType::General);
    }

    #[test]
    fn test_analysis_type_roundtrip_names() {
        for kind in [
            AnalysisType::Covenant,
            AnalysisType::Subsidiary,
            AnalysisType::DebtStructure,
            AnalysisType::General,
        ] {
            assert_eq!(AnalysisType::parse(kind.as_str()), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
    }
}
