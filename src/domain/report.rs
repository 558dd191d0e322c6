//! Canonical scan report model.
//!
//! A [`Report`] is an envelope (summary + risk score) around a tagged
//! [`ReportBody`]: audit, forge, or Web3. The variants make the
//! mutually-exclusive result facets unrepresentable in an invalid
//! combination — a report can never carry both `findings` and
//! `web3Findings`, or a quick-fix checklist alongside a safe checklist.
//!
//! On the wire the body is flattened into the envelope, so serialized
//! reports keep the optional-field shape consumed by dashboards:
//! exactly one of `findings`/`web3Findings`, exactly one of
//! `quickFixChecklist`/`safeChecklist`, and `gherkinFeatures` +
//! `apiTestCases` present together only for forge reports.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::value_objects::Severity;

/// Issue category for non-Web3 scans. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCategory {
    Auth,
    InputValidation,
    DataExposure,
    RateLimit,
    Logging,
    Config,
    Web,
}

/// Issue category for smart-contract scans. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Web3Category {
    AccessControl,
    TokenLogic,
    ReentrancyRisk,
    Upgradability,
    AdminKeys,
    Events,
}

/// Where and why an issue was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub endpoint: String,
    pub reason: String,
}

/// One reported issue in a non-contract analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub category: FindingCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub evidence: Evidence,
}

/// One reported issue in a smart-contract analysis.
///
/// Structurally a [`Finding`] minus `evidence` — contract analysis reasons
/// over whole-source properties, not endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Web3Finding {
    pub category: Web3Category,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// A synthesized behavioral-spec block (forge mode only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GherkinFeature {
    pub name: String,
    pub content: String,
}

/// A synthesized negative API test case (forge mode only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestCase {
    pub title: String,
    pub steps: Vec<String>,
    pub expected: String,
}

/// Audit result facet: findings plus a quick-fix checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub findings: Vec<Finding>,
    pub quick_fix_checklist: Vec<String>,
}

/// Forge result facet: audit output plus synthesized test artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgeReport {
    pub findings: Vec<Finding>,
    pub quick_fix_checklist: Vec<String>,
    pub gherkin_features: Vec<GherkinFeature>,
    pub api_test_cases: Vec<ApiTestCase>,
}

/// Web3 result facet: contract findings plus a fund-safety checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Web3Report {
    pub web3_findings: Vec<Web3Finding>,
    pub safe_checklist: Vec<String>,
}

/// The shape-discriminated part of a report.
///
/// Untagged on the wire; `Forge` is tried before `Audit` because the audit
/// field set is a strict subset of the forge field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReportBody {
    Forge(ForgeReport),
    Audit(AuditReport),
    Web3(Web3Report),
}

/// Canonical report envelope produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: String,
    /// Overall risk in [0, 100]; clamped during normalization.
    pub risk_score: u8,
    #[serde(flatten)]
    pub body: ReportBody,
}

/// Severity counts over whichever finding list a report carries.
///
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct SeverityHistogram {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityHistogram {
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

/// Coarse risk banding of the 0-100 score, for UI emphasis only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Low,
    Guarded,
    Elevated,
    Critical,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=25 => Self::Low,
            26..=50 => Self::Guarded,
            51..=75 => Self::Elevated,
            _ => Self::Critical,
        }
    }
}

impl Report {
    /// Severities of all findings, whichever facet is present.
    pub fn severities(&self) -> impl Iterator<Item = Severity> + '_ {
        let (findings, web3): (&[Finding], &[Web3Finding]) = match &self.body {
            ReportBody::Audit(a) => (&a.findings, &[]),
            ReportBody::Forge(f) => (&f.findings, &[]),
            ReportBody::Web3(w) => (&[], &w.web3_findings),
        };
        findings
            .iter()
            .map(|f| f.severity)
            .chain(web3.iter().map(|f| f.severity))
    }

    /// Count findings per severity, absent severities defaulting to 0.
    pub fn severity_histogram(&self) -> SeverityHistogram {
        let mut histogram = SeverityHistogram::default();
        for severity in self.severities() {
            match severity {
                Severity::Low => histogram.low += 1,
                Severity::Medium => histogram.medium += 1,
                Severity::High => histogram.high += 1,
                Severity::Critical => histogram.critical += 1,
            }
        }
        histogram
    }

    /// The single checklist a report carries, whichever facet is present.
    pub fn checklist(&self) -> &[String] {
        match &self.body {
            ReportBody::Audit(a) => &a.quick_fix_checklist,
            ReportBody::Forge(f) => &f.quick_fix_checklist,
            ReportBody::Web3(w) => &w.safe_checklist,
        }
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}
