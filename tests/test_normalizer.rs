//! Integration tests for report normalization

mod common;

use common::fixtures;
use sentinel::application::normalizer::normalize;
use sentinel::domain::errors::ScanError;
use sentinel::domain::report::ReportBody;
use sentinel::domain::value_objects::{ScanMode, ScanType, Severity};

#[test]
fn test_java_audit_scenario() {
    let raw = fixtures::audit_document();
    let report = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap();

    let ReportBody::Audit(audit) = &report.body else {
        panic!("expected audit body, got {:?}", report.body);
    };
    assert_eq!(audit.findings.len(), 1);
    assert_eq!(audit.findings[0].severity, Severity::High);
    assert_eq!(audit.findings[0].evidence.endpoint, "/user/{id}");

    let histogram = report.severity_histogram();
    assert_eq!(histogram.high, 1);
    assert_eq!(histogram.low + histogram.medium + histogram.critical, 0);

    // Exclusive facets stay absent on the wire
    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("web3Findings").is_none());
    assert!(value.get("safeChecklist").is_none());
    assert!(value.get("gherkinFeatures").is_none());
}

#[test]
fn test_smart_contract_forces_web3_regardless_of_mode() {
    let raw = fixtures::web3_document();
    for mode in [ScanMode::Audit, ScanMode::Forge] {
        let report = normalize(&raw, ScanType::SmartContract, mode).unwrap();
        let ReportBody::Web3(web3) = &report.body else {
            panic!("expected web3 body for mode {:?}", mode);
        };
        assert_eq!(web3.web3_findings.len(), 1);
        assert_eq!(web3.web3_findings[0].severity, Severity::Critical);

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("findings").is_none());
        assert!(value.get("gherkinFeatures").is_none());
        assert!(value.get("apiTestCases").is_none());
    }
}

#[test]
fn test_forge_carries_both_test_artifact_facets() {
    let raw = fixtures::forge_document();
    let report = normalize(&raw, ScanType::OpenApi, ScanMode::Forge).unwrap();

    let ReportBody::Forge(forge) = &report.body else {
        panic!("expected forge body");
    };
    assert_eq!(forge.gherkin_features.len(), 1);
    assert_eq!(forge.api_test_cases.len(), 1);
    assert_eq!(forge.api_test_cases[0].steps.len(), 2);
}

#[test]
fn test_forge_document_missing_test_artifacts_is_a_violation() {
    // An audit-shaped document does not satisfy the forge contract.
    let raw = fixtures::audit_document();
    let err = normalize(&raw, ScanType::OpenApi, ScanMode::Forge).unwrap_err();
    assert!(
        matches!(err, ScanError::SchemaViolation { ref field } if field == "gherkinFeatures"),
        "got {err}"
    );
}

#[test]
fn test_risk_score_is_clamped_not_rejected() {
    let mut raw = fixtures::audit_document();
    raw["riskScore"] = serde_json::json!(-10);
    let report = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap();
    assert_eq!(report.risk_score, 0);

    raw["riskScore"] = serde_json::json!(150);
    let report = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap();
    assert_eq!(report.risk_score, 100);
}

#[test]
fn test_normalize_is_idempotent() {
    let raw = fixtures::forge_document();
    let report = normalize(&raw, ScanType::OpenApi, ScanMode::Forge).unwrap();

    let round_trip = serde_json::to_value(&report).unwrap();
    let again = normalize(&round_trip, ScanType::OpenApi, ScanMode::Forge).unwrap();
    assert_eq!(report, again);
}

#[test]
fn test_missing_element_field_names_exact_path() {
    let mut raw = fixtures::audit_document();
    raw["findings"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({
            "category": "AUTH",
            "title": "no severity here",
            "description": "d",
            "recommendation": "r",
            "evidence": { "endpoint": "/x", "reason": "y" }
        }));

    let err = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap_err();
    assert!(
        matches!(err, ScanError::SchemaViolation { ref field } if field == "findings[1].severity"),
        "got {err}"
    );
}

#[test]
fn test_unknown_severity_is_a_violation_naming_the_field() {
    let mut raw = fixtures::audit_document();
    raw["findings"][0]["severity"] = serde_json::json!("CATASTROPHIC");
    let err = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap_err();
    assert!(
        matches!(err, ScanError::SchemaViolation { ref field } if field == "findings[0].severity"),
        "got {err}"
    );
}

#[test]
fn test_wrong_facet_for_contract_is_a_violation() {
    // Audit-shaped output against the web3 contract
    let raw = fixtures::audit_document();
    let err = normalize(&raw, ScanType::SmartContract, ScanMode::Audit).unwrap_err();
    assert!(
        matches!(err, ScanError::SchemaViolation { ref field } if field == "web3Findings"),
        "got {err}"
    );
}

#[test]
fn test_exactly_one_facet_pair_per_report() {
    let cases = [
        (fixtures::audit_document(), ScanType::JavaCode, ScanMode::Audit),
        (fixtures::forge_document(), ScanType::BugAnalysis, ScanMode::Forge),
        (fixtures::web3_document(), ScanType::SmartContract, ScanMode::Audit),
    ];
    for (raw, scan_type, mode) in cases {
        let report = normalize(&raw, scan_type, mode).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        let has_findings = value.get("findings").is_some();
        let has_web3 = value.get("web3Findings").is_some();
        assert!(has_findings ^ has_web3, "facet exclusivity violated");

        let has_quick_fix = value.get("quickFixChecklist").is_some();
        let has_safe = value.get("safeChecklist").is_some();
        assert!(has_quick_fix ^ has_safe, "checklist exclusivity violated");

        let has_gherkin = value.get("gherkinFeatures").is_some();
        let has_tests = value.get("apiTestCases").is_some();
        assert_eq!(has_gherkin, has_tests, "forge artifacts must travel together");
    }
}
