mod common;

use compliance_report::{AnalysisReport, Error, Severity, Theme};
use serde_json::json;

fn full() -> serde_json::Value {
    json!({
        "summary": "The agreement broadly complies with local law.",
        "jurisdictionCode": "MY",
        "flaggedClauses": [
            { "clauseText": "Employee waives all overtime pay.", "issue": "Conflicts with Employment Act", "severity": "high" },
            { "clauseText": "Notice period is 1 day.", "issue": "Below statutory minimum", "severity": "Medium" }
        ],
        "complianceIssues": [
            { "lawName": "Employment Act 1955", "missingRequirements": ["Overtime rate"], "recommendations": ["Pay 1.5x for overtime"] }
        ],
        "riskScore": {
            "overallScore": 72,
            "financialRiskEstimate": 125000.5,
            "violationCategories": ["Employment"],
            "jurisdictionRisks": { "MY": 18.5 }
        }
    })
}

fn missing_field(value: serde_json::Value) -> String {
    match AnalysisReport::from_value(value) {
        Err(Error::MissingRequiredField(path)) => path,
        other => panic!("expected a missing field error, got {other:?}"),
    }
}

fn invalid_field(value: serde_json::Value) -> String {
    match AnalysisReport::from_value(value) {
        Err(Error::InvalidField { field, .. }) => field,
        other => panic!("expected an invalid field error, got {other:?}"),
    }
}

#[test]
fn camel_case_report_is_decoded() {
    let report = AnalysisReport::from_value(full()).unwrap();
    assert_eq!(report.jurisdiction_code, "MY");
    assert_eq!(report.jurisdiction_name(), "Malaysia");
    assert_eq!(report.flagged_clauses.len(), 2);
    assert_eq!(report.flagged_clauses[0].severity, Severity::High);
    assert_eq!(report.flagged_clauses[1].severity, Severity::Medium);
    assert_eq!(report.highest_severity(), Some(Severity::High));
    let score = report.risk_score.unwrap();
    assert_eq!(score.overall_score, 72);
    assert_eq!(score.jurisdiction_risks["MY"], 18.5);
}

#[test]
fn backend_snake_case_keys_are_accepted() {
    let value = json!({
        "summary": "ok",
        "jurisdiction": "SG",
        "flagged_clauses": [
            { "clause_text": "x", "issue": "y", "severity": "LOW" }
        ],
        "compliance_issues": [
            { "law": "PDPA 2012", "missing_requirements": [], "recommendations": [] }
        ],
        "risk_score": {
            "overall_score": 100,
            "financial_risk_estimate": 0,
            "violation_categories": [],
            "jurisdiction_risks": {}
        }
    });
    let report = AnalysisReport::from_value(value).unwrap();
    assert_eq!(report.jurisdiction_code, "SG");
    assert_eq!(report.compliance_issues[0].law_name, "PDPA 2012");
    assert_eq!(report.risk_score.unwrap().overall_score, 100);
}

#[test]
fn risk_score_is_optional() {
    let mut value = full();
    value.as_object_mut().unwrap().remove("riskScore");
    let report = AnalysisReport::from_value(value).unwrap();
    assert!(report.risk_score.is_none());
}

#[test]
fn missing_fields_are_reported_by_path() {
    let mut value = full();
    value.as_object_mut().unwrap().remove("summary");
    assert_eq!(missing_field(value), "summary");

    let mut value = full();
    value.as_object_mut().unwrap().remove("flaggedClauses");
    assert_eq!(missing_field(value), "flaggedClauses");

    let mut value = full();
    value["flaggedClauses"][1].as_object_mut().unwrap().remove("severity");
    assert_eq!(missing_field(value), "flaggedClauses[1].severity");

    let mut value = full();
    value["complianceIssues"][0].as_object_mut().unwrap().remove("recommendations");
    assert_eq!(missing_field(value), "complianceIssues[0].recommendations");

    let mut value = full();
    value["riskScore"].as_object_mut().unwrap().remove("overallScore");
    assert_eq!(missing_field(value), "riskScore.overallScore");
}

#[test]
fn bad_values_are_rejected() {
    let mut value = full();
    value["flaggedClauses"][0]["severity"] = json!("critical");
    assert_eq!(invalid_field(value), "flaggedClauses[0].severity");

    let mut value = full();
    value["riskScore"]["overallScore"] = json!(101);
    assert_eq!(invalid_field(value), "riskScore.overallScore");

    let mut value = full();
    value["riskScore"]["overallScore"] = json!(72.5);
    assert_eq!(invalid_field(value), "riskScore.overallScore");

    let mut value = full();
    value["riskScore"]["financialRiskEstimate"] = json!(-1);
    assert_eq!(invalid_field(value), "riskScore.financialRiskEstimate");
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = AnalysisReport::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));

    let err = AnalysisReport::from_json(r#"{"summary": 3}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn filename_is_derived_from_product_jurisdiction_and_time() {
    let report = AnalysisReport::from_value(full()).unwrap();
    let opts = common::options(Theme::default());
    assert_eq!(
        opts.filename_for(&report, "pdf"),
        "compliance-analyzer-MY-2024-03-15T09-30-00.pdf"
    );

    let mut no_code = report.clone();
    no_code.jurisdiction_code = "--".to_string();
    assert_eq!(
        opts.filename_for(&no_code, "pdf"),
        "compliance-analyzer-2024-03-15T09-30-00.pdf"
    );

    let mut named = opts.clone();
    named.filename = Some("contract.pdf".to_string());
    assert_eq!(named.filename_for(&report, "pdf"), "contract.pdf");
}
