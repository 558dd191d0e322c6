//! Schema registry: the result-shape contract per analysis profile.
//!
//! A [`ReportContract`] names, in declaration order, the top-level fields a
//! raw analysis document must carry and, for array fields, the required
//! fields of each element. The same contract serves two consumers: it is
//! rendered as the `responseSchema` constraint sent to the analysis backend,
//! and it drives normalization-time validation, so the shape the backend is
//! asked for and the shape we check are never out of sync.

use serde_json::{Value, json};

use super::value_objects::{AnalysisProfile, ScanMode, ScanType};

/// Expected JSON kind of a contract field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    TextArray,
    /// Object with its own required fields.
    Object(&'static [FieldSpec]),
    /// Array of objects, each with the given required fields.
    ObjectArray(&'static [FieldSpec]),
}

/// One required field of a contract, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Required-shape description a raw analysis result must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContract {
    pub profile: AnalysisProfile,
    /// Top-level required fields, in validation order.
    pub required: &'static [FieldSpec],
}

const FINDING_FIELDS: &[FieldSpec] = &[
    field("category", FieldKind::Text),
    field("severity", FieldKind::Text),
    field("title", FieldKind::Text),
    field("description", FieldKind::Text),
    field("recommendation", FieldKind::Text),
    field(
        "evidence",
        FieldKind::Object(&[
            field("endpoint", FieldKind::Text),
            field("reason", FieldKind::Text),
        ]),
    ),
];

const WEB3_FINDING_FIELDS: &[FieldSpec] = &[
    field("category", FieldKind::Text),
    field("severity", FieldKind::Text),
    field("title", FieldKind::Text),
    field("description", FieldKind::Text),
    field("recommendation", FieldKind::Text),
];

const GHERKIN_FIELDS: &[FieldSpec] = &[
    field("name", FieldKind::Text),
    field("content", FieldKind::Text),
];

const API_TEST_CASE_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("steps", FieldKind::TextArray),
    field("expected", FieldKind::Text),
];

const AUDIT_CONTRACT: ReportContract = ReportContract {
    profile: AnalysisProfile::Audit,
    required: &[
        field("summary", FieldKind::Text),
        field("riskScore", FieldKind::Number),
        field("findings", FieldKind::ObjectArray(FINDING_FIELDS)),
        field("quickFixChecklist", FieldKind::TextArray),
    ],
};

const FORGE_CONTRACT: ReportContract = ReportContract {
    profile: AnalysisProfile::Forge,
    required: &[
        field("summary", FieldKind::Text),
        field("riskScore", FieldKind::Number),
        field("findings", FieldKind::ObjectArray(FINDING_FIELDS)),
        field("quickFixChecklist", FieldKind::TextArray),
        field("gherkinFeatures", FieldKind::ObjectArray(GHERKIN_FIELDS)),
        field("apiTestCases", FieldKind::ObjectArray(API_TEST_CASE_FIELDS)),
    ],
};

const WEB3_CONTRACT: ReportContract = ReportContract {
    profile: AnalysisProfile::Web3,
    required: &[
        field("summary", FieldKind::Text),
        field("riskScore", FieldKind::Number),
        field("web3Findings", FieldKind::ObjectArray(WEB3_FINDING_FIELDS)),
        field("safeChecklist", FieldKind::TextArray),
    ],
};

/// Maps `(ScanType, ScanMode)` to the result-shape contract the analysis
/// backend must honor.
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Resolve the contract for a scan request.
    ///
    /// Pure and total over the closed `(ScanType, ScanMode)` product; the
    /// smart-contract mode override is applied via
    /// [`AnalysisProfile::resolve`].
    pub fn resolve(scan_type: ScanType, mode: ScanMode) -> &'static ReportContract {
        Self::for_profile(AnalysisProfile::resolve(scan_type, mode))
    }

    pub fn for_profile(profile: AnalysisProfile) -> &'static ReportContract {
        match profile {
            AnalysisProfile::Audit => &AUDIT_CONTRACT,
            AnalysisProfile::Forge => &FORGE_CONTRACT,
            AnalysisProfile::Web3 => &WEB3_CONTRACT,
        }
    }
}

impl ReportContract {
    /// Look up a top-level required field by name.
    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|f| f.name == name)
    }

    /// Render this contract as the structured-output schema sent to the
    /// analysis backend (Gemini `responseSchema` dialect).
    pub fn response_schema(&self) -> Value {
        json!({
            "type": "OBJECT",
            "properties": Value::Object(
                self.required
                    .iter()
                    .map(|f| (f.name.to_string(), Self::kind_schema(f.kind)))
                    .collect()
            ),
            "required": self.required.iter().map(|f| f.name).collect::<Vec<_>>(),
        })
    }

    fn kind_schema(kind: FieldKind) -> Value {
        match kind {
            FieldKind::Text => json!({ "type": "STRING" }),
            FieldKind::Number => json!({ "type": "NUMBER" }),
            FieldKind::TextArray => json!({
                "type": "ARRAY",
                "items": { "type": "STRING" },
            }),
            FieldKind::Object(fields) => json!({
                "type": "OBJECT",
                "properties": Value::Object(
                    fields
                        .iter()
                        .map(|f| (f.name.to_string(), Self::kind_schema(f.kind)))
                        .collect()
                ),
                "required": fields.iter().map(|f| f.name).collect::<Vec<_>>(),
            }),
            FieldKind::ObjectArray(fields) => json!({
                "type": "ARRAY",
                "items": Self::kind_schema(FieldKind::Object(fields)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_total_and_profile_consistent() {
        for scan_type in ScanType::ALL {
            for mode in [ScanMode::Audit, ScanMode::Forge] {
                let contract = SchemaRegistry::resolve(scan_type, mode);
                assert_eq!(contract.profile, AnalysisProfile::resolve(scan_type, mode));
                assert!(contract.requires("summary"));
                assert!(contract.requires("riskScore"));
            }
        }
    }

    #[test]
    fn test_contracts_never_require_incompatible_facets() {
        let web3 = SchemaRegistry::resolve(ScanType::SmartContract, ScanMode::Forge);
        assert!(web3.requires("web3Findings"));
        assert!(web3.requires("safeChecklist"));
        assert!(!web3.requires("findings"));
        assert!(!web3.requires("quickFixChecklist"));
        assert!(!web3.requires("gherkinFeatures"));

        let audit = SchemaRegistry::resolve(ScanType::JavaCode, ScanMode::Audit);
        assert!(audit.requires("findings"));
        assert!(!audit.requires("web3Findings"));
        assert!(!audit.requires("gherkinFeatures"));

        let forge = SchemaRegistry::resolve(ScanType::OpenApi, ScanMode::Forge);
        assert!(forge.requires("gherkinFeatures"));
        assert!(forge.requires("apiTestCases"));
        assert!(!forge.requires("safeChecklist"));
    }

    #[test]
    fn test_response_schema_rendering() {
        let schema = AUDIT_CONTRACT.response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["required"],
            serde_json::json!(["summary", "riskScore", "findings", "quickFixChecklist"])
        );
        let findings = &schema["properties"]["findings"];
        assert_eq!(findings["type"], "ARRAY");
        assert_eq!(
            findings["items"]["properties"]["evidence"]["required"],
            serde_json::json!(["endpoint", "reason"])
        );
    }
}
