//! Report normalization: validate a raw analysis document against its
//! schema contract and produce the canonical typed [`Report`].
//!
//! Pure and deterministic: no hidden state, no I/O. Identical raw input
//! yields an identical report.

use serde_json::{Map, Value};

use crate::domain::errors::ScanError;
use crate::domain::report::{
    ApiTestCase, AuditReport, Evidence, Finding, ForgeReport, GherkinFeature, Report, ReportBody,
    Web3Finding, Web3Report,
};
use crate::domain::schema::{FieldKind, ReportContract, SchemaRegistry};
use crate::domain::value_objects::{AnalysisProfile, ScanMode, ScanType};

/// Normalize a raw document for the given scan request.
///
/// 1. Validates against the registry contract for the effective profile,
///    failing with [`ScanError::SchemaViolation`] naming the first missing
///    or ill-shaped field (top-level fields in contract declaration order,
///    then array elements in array order).
/// 2. Clamps `riskScore` into [0, 100]; out-of-range values are clamped,
///    not rejected, since backend output is untrusted.
/// 3. Builds the typed report variant. Severity and category strings
///    outside their closed sets are schema violations naming the exact
///    field path.
pub fn normalize(raw: &Value, scan_type: ScanType, mode: ScanMode) -> Result<Report, ScanError> {
    let profile = AnalysisProfile::resolve(scan_type, mode);
    let contract = SchemaRegistry::for_profile(profile);

    let document = validate(raw, contract)?;

    let summary = text(document, "summary", "")?;
    let risk_score = clamp_risk_score(number(document, "riskScore", "")?);

    let body = match profile {
        AnalysisProfile::Audit => ReportBody::Audit(AuditReport {
            findings: findings(document)?,
            quick_fix_checklist: text_array(document, "quickFixChecklist", "")?,
        }),
        AnalysisProfile::Forge => ReportBody::Forge(ForgeReport {
            findings: findings(document)?,
            quick_fix_checklist: text_array(document, "quickFixChecklist", "")?,
            gherkin_features: gherkin_features(document)?,
            api_test_cases: api_test_cases(document)?,
        }),
        AnalysisProfile::Web3 => ReportBody::Web3(Web3Report {
            web3_findings: web3_findings(document)?,
            safe_checklist: text_array(document, "safeChecklist", "")?,
        }),
    };

    Ok(Report {
        summary,
        risk_score,
        body,
    })
}

fn clamp_risk_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

// ── Structural validation ────────────────────────────────────────────

/// Walk the contract in declaration order; fail on the first field that is
/// missing, null, or of the wrong JSON kind.
fn validate<'a>(
    raw: &'a Value,
    contract: &ReportContract,
) -> Result<&'a Map<String, Value>, ScanError> {
    let document = raw
        .as_object()
        .ok_or_else(|| ScanError::schema_violation(contract.required[0].name))?;

    for spec in contract.required {
        check_field(document, spec.name, spec.name, spec.kind)?;
    }
    Ok(document)
}

fn check_field(
    parent: &Map<String, Value>,
    name: &str,
    path: &str,
    kind: FieldKind,
) -> Result<(), ScanError> {
    let value = match parent.get(name) {
        Some(v) if !v.is_null() => v,
        _ => return Err(ScanError::schema_violation(path)),
    };
    check_kind(value, path, kind)
}

fn check_kind(value: &Value, path: &str, kind: FieldKind) -> Result<(), ScanError> {
    match kind {
        FieldKind::Text if value.is_string() => Ok(()),
        FieldKind::Number if value.is_number() => Ok(()),
        FieldKind::TextArray => {
            let items = value
                .as_array()
                .ok_or_else(|| ScanError::schema_violation(path))?;
            for (idx, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(ScanError::schema_violation(format!("{}[{}]", path, idx)));
                }
            }
            Ok(())
        }
        FieldKind::Object(fields) => {
            let object = value
                .as_object()
                .ok_or_else(|| ScanError::schema_violation(path))?;
            for spec in fields {
                let child_path = format!("{}.{}", path, spec.name);
                check_field(object, spec.name, &child_path, spec.kind)?;
            }
            Ok(())
        }
        FieldKind::ObjectArray(fields) => {
            let items = value
                .as_array()
                .ok_or_else(|| ScanError::schema_violation(path))?;
            for (idx, item) in items.iter().enumerate() {
                let element_path = format!("{}[{}]", path, idx);
                let object = item
                    .as_object()
                    .ok_or_else(|| ScanError::schema_violation(&element_path))?;
                for spec in fields {
                    let child_path = format!("{}.{}", element_path, spec.name);
                    check_field(object, spec.name, &child_path, spec.kind)?;
                }
            }
            Ok(())
        }
        _ => Err(ScanError::schema_violation(path)),
    }
}

// ── Typed construction ───────────────────────────────────────────────
//
// Runs after structural validation, so presence and JSON kinds are already
// guaranteed; these helpers stay total anyway and report the field path on
// any mismatch.

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn text(parent: &Map<String, Value>, name: &str, prefix: &str) -> Result<String, ScanError> {
    parent
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ScanError::schema_violation(join(prefix, name)))
}

fn number(parent: &Map<String, Value>, name: &str, prefix: &str) -> Result<f64, ScanError> {
    parent
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| ScanError::schema_violation(join(prefix, name)))
}

fn text_array(
    parent: &Map<String, Value>,
    name: &str,
    prefix: &str,
) -> Result<Vec<String>, ScanError> {
    let path = join(prefix, name);
    let items = parent
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| ScanError::schema_violation(&path))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ScanError::schema_violation(format!("{}[{}]", path, idx)))
        })
        .collect()
}

/// Parse a closed-set enum value (severity, category) from a string field.
fn closed_set<T: serde::de::DeserializeOwned>(
    parent: &Map<String, Value>,
    name: &str,
    prefix: &str,
) -> Result<T, ScanError> {
    let path = join(prefix, name);
    let value = parent
        .get(name)
        .cloned()
        .ok_or_else(|| ScanError::schema_violation(&path))?;
    serde_json::from_value(value).map_err(|_| ScanError::schema_violation(path))
}

fn object_array<'a>(
    parent: &'a Map<String, Value>,
    name: &str,
) -> Result<Vec<(String, &'a Map<String, Value>)>, ScanError> {
    let items = parent
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| ScanError::schema_violation(name))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let path = format!("{}[{}]", name, idx);
            item.as_object()
                .map(|object| (path.clone(), object))
                .ok_or_else(|| ScanError::schema_violation(path))
        })
        .collect()
}

fn findings(document: &Map<String, Value>) -> Result<Vec<Finding>, ScanError> {
    object_array(document, "findings")?
        .into_iter()
        .map(|(path, item)| {
            let evidence_path = join(&path, "evidence");
            let evidence = item
                .get("evidence")
                .and_then(Value::as_object)
                .ok_or_else(|| ScanError::schema_violation(&evidence_path))?;
            Ok(Finding {
                category: closed_set(item, "category", &path)?,
                severity: closed_set(item, "severity", &path)?,
                title: text(item, "title", &path)?,
                description: text(item, "description", &path)?,
                recommendation: text(item, "recommendation", &path)?,
                evidence: Evidence {
                    endpoint: text(evidence, "endpoint", &evidence_path)?,
                    reason: text(evidence, "reason", &evidence_path)?,
                },
            })
        })
        .collect()
}

fn web3_findings(document: &Map<String, Value>) -> Result<Vec<Web3Finding>, ScanError> {
    object_array(document, "web3Findings")?
        .into_iter()
        .map(|(path, item)| {
            Ok(Web3Finding {
                category: closed_set(item, "category", &path)?,
                severity: closed_set(item, "severity", &path)?,
                title: text(item, "title", &path)?,
                description: text(item, "description", &path)?,
                recommendation: text(item, "recommendation", &path)?,
            })
        })
        .collect()
}

fn gherkin_features(document: &Map<String, Value>) -> Result<Vec<GherkinFeature>, ScanError> {
    object_array(document, "gherkinFeatures")?
        .into_iter()
        .map(|(path, item)| {
            Ok(GherkinFeature {
                name: text(item, "name", &path)?,
                content: text(item, "content", &path)?,
            })
        })
        .collect()
}

fn api_test_cases(document: &Map<String, Value>) -> Result<Vec<ApiTestCase>, ScanError> {
    object_array(document, "apiTestCases")?
        .into_iter()
        .map(|(path, item)| {
            Ok(ApiTestCase {
                title: text(item, "title", &path)?,
                steps: text_array(item, "steps", &path)?,
                expected: text(item, "expected", &path)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_risk_score() {
        assert_eq!(clamp_risk_score(-10.0), 0);
        assert_eq!(clamp_risk_score(150.0), 100);
        assert_eq!(clamp_risk_score(42.4), 42);
        assert_eq!(clamp_risk_score(42.6), 43);
    }

    #[test]
    fn test_non_object_document_names_first_required_field() {
        let err = normalize(
            &serde_json::json!([1, 2, 3]),
            ScanType::JavaCode,
            ScanMode::Audit,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::SchemaViolation { ref field } if field == "summary"));
    }

    #[test]
    fn test_first_violation_wins_in_declaration_order() {
        // Both riskScore and findings missing: riskScore is declared first.
        let raw = serde_json::json!({ "summary": "s" });
        let err = normalize(&raw, ScanType::JavaCode, ScanMode::Audit).unwrap_err();
        assert!(matches!(err, ScanError::SchemaViolation { ref field } if field == "riskScore"));
    }
}
