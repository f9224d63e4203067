use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlaggedClause {
    pub clause_text: String,
    pub issue: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceIssue {
    pub law_name: String,
    pub missing_requirements: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RiskScore {
    /// 0-100.
    pub overall_score: u8,
    pub financial_risk_estimate: f64,
    pub violation_categories: Vec<String>,
    /// Keyed by jurisdiction code; ordered so rendering is deterministic.
    pub jurisdiction_risks: BTreeMap<String, f64>,
}

/// Result of a contract compliance analysis, the input of report generation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    pub summary: String,
    pub jurisdiction_code: String,
    pub flagged_clauses: Vec<FlaggedClause>,
    pub compliance_issues: Vec<ComplianceIssue>,
    pub risk_score: Option<RiskScore>,
}

const JURISDICTIONS: &[(&str, &str)] = &[
    ("MY", "Malaysia"),
    ("SG", "Singapore"),
    ("EU", "European Union"),
    ("US", "United States"),
];

/// Display name for a jurisdiction code. Unknown codes are returned verbatim.
pub fn jurisdiction_display_name(code: &str) -> &str {
    JURISDICTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

impl AnalysisReport {
    /// Decode and validate an analysis result from JSON. Accepts both the
    /// camelCase keys of the front end and the snake_case keys of the
    /// analysis backend.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: RawReport = serde_json::from_str(json)?;
        raw.into_report()
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        let raw: RawReport = serde_json::from_value(value)?;
        raw.into_report()
    }

    pub fn jurisdiction_name(&self) -> &str {
        jurisdiction_display_name(&self.jurisdiction_code)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.flagged_clauses.iter().map(|c| c.severity).max()
    }

    /// Check the numeric constraints the type system does not carry.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(score) = &self.risk_score {
            check_score(score.overall_score as f64)?;
            check_estimate(score.financial_risk_estimate)?;
            for (code, risk) in &score.jurisdiction_risks {
                if !risk.is_finite() {
                    return Err(Error::invalid(
                        format!("riskScore.jurisdictionRisks.{code}"),
                        "must be a finite number",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn check_score(score: f64) -> Result<u8, Error> {
    if score.fract() != 0.0 || !(0.0..=100.0).contains(&score) {
        return Err(Error::invalid(
            "riskScore.overallScore",
            format!("expected an integer between 0 and 100, got {score}"),
        ));
    }
    Ok(score as u8)
}

fn check_estimate(estimate: f64) -> Result<f64, Error> {
    if !estimate.is_finite() || estimate < 0.0 {
        return Err(Error::invalid(
            "riskScore.financialRiskEstimate",
            format!("expected a non-negative amount, got {estimate}"),
        ));
    }
    Ok(estimate)
}

fn required<T>(value: Option<T>, path: impl FnOnce() -> String) -> Result<T, Error> {
    value.ok_or_else(|| Error::MissingRequiredField(path()))
}

// Every field is optional on the wire so that an absent one can be reported
// by name instead of as a generic serde error.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    summary: Option<String>,
    #[serde(alias = "jurisdiction", alias = "jurisdiction_code")]
    jurisdiction_code: Option<String>,
    #[serde(alias = "flagged_clauses")]
    flagged_clauses: Option<Vec<RawClause>>,
    #[serde(alias = "compliance_issues")]
    compliance_issues: Option<Vec<RawIssue>>,
    #[serde(alias = "risk_score")]
    risk_score: Option<RawRiskScore>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClause {
    #[serde(alias = "clause_text")]
    clause_text: Option<String>,
    issue: Option<String>,
    severity: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIssue {
    #[serde(alias = "law", alias = "law_name")]
    law_name: Option<String>,
    #[serde(alias = "missing_requirements")]
    missing_requirements: Option<Vec<String>>,
    recommendations: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRiskScore {
    #[serde(alias = "overall_score")]
    overall_score: Option<f64>,
    #[serde(alias = "financial_risk_estimate")]
    financial_risk_estimate: Option<f64>,
    #[serde(alias = "violation_categories")]
    violation_categories: Option<Vec<String>>,
    #[serde(alias = "jurisdiction_risks")]
    jurisdiction_risks: Option<BTreeMap<String, f64>>,
}

impl RawReport {
    fn into_report(self) -> Result<AnalysisReport, Error> {
        let summary = required(self.summary, || "summary".into())?;
        let jurisdiction_code = required(self.jurisdiction_code, || "jurisdictionCode".into())?;

        let flagged_clauses = required(self.flagged_clauses, || "flaggedClauses".into())?
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.into_clause(i))
            .collect::<Result<Vec<_>, _>>()?;

        let compliance_issues = required(self.compliance_issues, || "complianceIssues".into())?
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.into_issue(i))
            .collect::<Result<Vec<_>, _>>()?;

        let risk_score = self.risk_score.map(RawRiskScore::into_score).transpose()?;

        let report = AnalysisReport {
            summary,
            jurisdiction_code,
            flagged_clauses,
            compliance_issues,
            risk_score,
        };
        report.validate()?;
        Ok(report)
    }
}

impl RawClause {
    fn into_clause(self, idx: usize) -> Result<FlaggedClause, Error> {
        let path = |field: &str| format!("flaggedClauses[{idx}].{field}");
        let clause_text = required(self.clause_text, || path("clauseText"))?;
        let issue = required(self.issue, || path("issue"))?;
        let raw_severity = required(self.severity, || path("severity"))?;
        let severity = Severity::parse(&raw_severity).ok_or_else(|| {
            Error::invalid(
                path("severity"),
                format!("expected low, medium or high, got {raw_severity:?}"),
            )
        })?;
        Ok(FlaggedClause {
            clause_text,
            issue,
            severity,
        })
    }
}

impl RawIssue {
    fn into_issue(self, idx: usize) -> Result<ComplianceIssue, Error> {
        let path = |field: &str| format!("complianceIssues[{idx}].{field}");
        Ok(ComplianceIssue {
            law_name: required(self.law_name, || path("lawName"))?,
            missing_requirements: required(self.missing_requirements, || {
                path("missingRequirements")
            })?,
            recommendations: required(self.recommendations, || path("recommendations"))?,
        })
    }
}

impl RawRiskScore {
    fn into_score(self) -> Result<RiskScore, Error> {
        let path = |field: &str| format!("riskScore.{field}");
        let overall_score = check_score(required(self.overall_score, || path("overallScore"))?)?;
        let financial_risk_estimate = check_estimate(required(self.financial_risk_estimate, || {
            path("financialRiskEstimate")
        })?)?;
        Ok(RiskScore {
            overall_score,
            financial_risk_estimate,
            violation_categories: required(self.violation_categories, || {
                path("violationCategories")
            })?,
            jurisdiction_risks: required(self.jurisdiction_risks, || path("jurisdictionRisks"))?,
        })
    }
}
