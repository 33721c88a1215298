#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Filing analysis (placeholder).
//!
//! This crate defines the [`FilingAnalyzer`] seam and a placeholder
//! implementation that returns fixed sample results. A language-model backed
//! analyzer can be dropped in behind the same trait.
//!
//! # Example
//!
//! ```
//! use stratum_analysis::{AnalysisType, FilingAnalyzer, PlaceholderAnalyzer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let analyzer = PlaceholderAnalyzer::new();
//! let analysis = analyzer
//!     .analyze("...filing text...", "ACME", AnalysisType::parse("covenant"))
//!     .await
//!     .unwrap();
//! assert_eq!(analysis.ticker(), "ACME");
//! # }
//! ```

/// Analysis output types.
pub mod report;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;
use stratum_core::Result;
use tracing::debug;

pub use report::{
    AnalysisType, CovenantAnalysis, DebtFacility, DebtStructureAnalysis, Entity,
    FilingAnalysis, FinancialCovenant, FinancialHighlights, GeneralAnalysis, GuaranteeStructure,
    NegativeCovenant, Subsidiary, SubsidiaryAnalysis,
};

/// Turns the text of a filing into a structured analysis.
#[async_trait]
pub trait FilingAnalyzer: Send + Sync + Debug {
    /// Returns the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyzes `content`, the extracted text of a filing by `ticker`.
    async fn analyze(
        &self,
        content: &str,
        ticker: &str,
        analysis_type: AnalysisType,
    ) -> Result<FilingAnalysis>;
}

/// Analyzer returning fixed sample results.
///
/// The output depends only on the ticker and the analysis type; the filing
/// content is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAnalyzer;

impl PlaceholderAnalyzer {
    /// Create a new placeholder analyzer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn covenants(ticker: &str) -> CovenantAnalysis {
        CovenantAnalysis {
            covenants_found: true,
            financial_covenants: vec![FinancialCovenant {
                name: "Debt Service Coverage Ratio".to_string(),
                threshold: "1.25x".to_string(),
                description: "Company must maintain DSCR above 1.25x".to_string(),
                testing_frequency: "Quarterly".to_string(),
                source_section: "Note 8 - Debt Obligations".to_string(),
            }],
            negative_covenants: vec![NegativeCovenant {
                restriction: "Dividend Payments".to_string(),
                description: "No dividends if leverage exceeds 4.0x".to_string(),
                source_section: "Credit Agreement Summary".to_string(),
            }],
            analysis_confidence: 0.85,
            extraction_method: "AI-Enhanced SEC Filing Analysis".to_string(),
            ticker: ticker.to_string(),
        }
    }

    fn subsidiaries(ticker: &str) -> SubsidiaryAnalysis {
        let operating = format!("{ticker} Operating Company");
        SubsidiaryAnalysis {
            subsidiaries_found: true,
            parent_company: Entity {
                name: format!("{ticker} Holdings"),
                jurisdiction: "Delaware".to_string(),
                entity_type: "Corporation".to_string(),
            },
            subsidiaries: vec![Subsidiary {
                name: operating.clone(),
                jurisdiction: "Delaware".to_string(),
                ownership_percentage: "100%".to_string(),
                entity_type: "Operating Company".to_string(),
                is_guarantor: true,
                significant_assets: "Primary business operations".to_string(),
            }],
            guarantee_structure: GuaranteeStructure {
                guarantor_subsidiaries: vec![operating],
                non_guarantor_subsidiaries: Vec::new(),
                guarantee_type: "Full and Unconditional".to_string(),
            },
            analysis_confidence: 0.82,
            extraction_method: "AI-Enhanced Subsidiary Mapping".to_string(),
            ticker: ticker.to_string(),
        }
    }

    fn debt_structure(ticker: &str) -> DebtStructureAnalysis {
        let operating = format!("{ticker} Operating Company");
        let debt_by_entity = BTreeMap::from([
            (format!("{ticker} Holdings"), "$500M".to_string()),
            (operating.clone(), "$0M (Guarantor)".to_string()),
        ]);
        DebtStructureAnalysis {
            debt_found: true,
            total_debt: "$500M".to_string(),
            debt_breakdown: vec![
                DebtFacility {
                    facility_name: "Term Loan A".to_string(),
                    amount: Some("$300M".to_string()),
                    maturity: "2027-12-31".to_string(),
                    interest_rate: "SOFR + 275bps".to_string(),
                    security: "First Lien".to_string(),
                    guarantors: Some(vec![operating]),
                    ..Default::default()
                },
                DebtFacility {
                    facility_name: "Revolving Credit Facility".to_string(),
                    commitment: Some("$200M".to_string()),
                    outstanding: Some("$50M".to_string()),
                    maturity: "2026-12-31".to_string(),
                    interest_rate: "SOFR + 250bps".to_string(),
                    security: "First Lien".to_string(),
                    ..Default::default()
                },
            ],
            debt_by_entity,
            analysis_confidence: 0.88,
            extraction_method: "AI-Enhanced Debt Structure Analysis".to_string(),
            ticker: ticker.to_string(),
        }
    }

    fn general(ticker: &str) -> GeneralAnalysis {
        GeneralAnalysis {
            analysis_complete: true,
            financial_highlights: FinancialHighlights {
                revenue_trend: "Declining".to_string(),
                profitability: "Pressured margins".to_string(),
                liquidity: "Adequate near-term".to_string(),
                leverage: "Elevated debt levels".to_string(),
            },
            key_risks: vec![
                "Market competition".to_string(),
                "Debt refinancing requirements".to_string(),
                "Operational challenges".to_string(),
            ],
            distress_indicators: vec![
                "Covenant pressure".to_string(),
                "Liquidity concerns".to_string(),
            ],
            analysis_confidence: 0.75,
            extraction_method: "AI-Enhanced Financial Analysis".to_string(),
            ticker: ticker.to_string(),
        }
    }
}

#[async_trait]
impl FilingAnalyzer for PlaceholderAnalyzer {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn analyze(
        &self,
        content: &str,
        ticker: &str,
        analysis_type: AnalysisType,
    ) -> Result<FilingAnalysis> {
        debug!(
            "Placeholder {} analysis for {} ({} chars)",
            analysis_type,
            ticker,
            content.len()
        );

        Ok(match analysis_type {
            AnalysisType::Covenant => FilingAnalysis::Covenant(Self::covenants(ticker)),
            AnalysisType::Subsidiary => FilingAnalysis::Subsidiary(Self::subsidiaries(ticker)),
            AnalysisType::DebtStructure => {
                FilingAnalysis::DebtStructure(Self::debt_structure(ticker))
            }
            AnalysisType::General => FilingAnalysis::General(Self::general(ticker)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_covenant_analysis() {
        let analysis = PlaceholderAnalyzer::new()
            .analyze("text", "ACME", AnalysisType::Covenant)
            .await
            .unwrap();

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["covenants_found"], true);
        assert_eq!(value["financial_covenants"][0]["threshold"], "1.25x");
        assert_eq!(
            value["financial_covenants"][0]["source_section"],
            "Note 8 - Debt Obligations"
        );
        assert_eq!(value["negative_covenants"][0]["restriction"], "Dividend Payments");
        assert_eq!(value["analysis_confidence"], 0.85);
        assert_eq!(value["ticker"], "ACME");
    }

    #[tokio::test]
    async fn test_subsidiary_analysis_uses_ticker() {
        let analysis = PlaceholderAnalyzer::new()
            .analyze("text", "ACME", AnalysisType::Subsidiary)
            .await
            .unwrap();

        let FilingAnalysis::Subsidiary(subs) = analysis else {
            panic!("expected subsidiary analysis");
        };
        assert_eq!(subs.parent_company.name, "ACME Holdings");
        assert_eq!(subs.subsidiaries[0].name, "ACME Operating Company");
        assert!(subs.subsidiaries[0].is_guarantor);
        assert_eq!(
            subs.guarantee_structure.guarantor_subsidiaries,
            vec!["ACME Operating Company".to_string()]
        );
        assert!(subs.guarantee_structure.non_guarantor_subsidiaries.is_empty());
    }

    #[tokio::test]
    async fn test_debt_structure_facilities() {
        let analysis = PlaceholderAnalyzer::new()
            .analyze("text", "ACME", AnalysisType::DebtStructure)
            .await
            .unwrap();

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["total_debt"], "$500M");
        assert_eq!(value["debt_breakdown"][0]["amount"], "$300M");
        assert_eq!(
            value["debt_breakdown"][0]["guarantors"],
            json!(["ACME Operating Company"])
        );
        assert!(value["debt_breakdown"][1].get("amount").is_none());
        assert_eq!(value["debt_breakdown"][1]["outstanding"], "$50M");
        assert!(value["debt_breakdown"][1].get("guarantors").is_none());
        assert_eq!(value["debt_by_entity"]["ACME Holdings"], "$500M");
        assert_eq!(
            value["debt_by_entity"]["ACME Operating Company"],
            "$0M (Guarantor)"
        );
    }

    #[tokio::test]
    async fn test_unknown_type_is_general() {
        let analysis = PlaceholderAnalyzer::new()
            .analyze("text", "ACME", AnalysisType::parse("liquidity"))
            .await
            .unwrap();

        assert!(matches!(analysis, FilingAnalysis::General(_)));
        assert_eq!(analysis.confidence(), 0.75);

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["key_risks"].as_array().unwrap().len(), 3);
        assert_eq!(value["distress_indicators"].as_array().unwrap().len(), 2);
        assert_eq!(value["financial_highlights"]["leverage"], "Elevated debt levels");
    }
}
