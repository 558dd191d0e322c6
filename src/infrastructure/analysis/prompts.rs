//! Prompt templates per analysis profile.

use crate::domain::value_objects::{AnalysisProfile, ScanMode, ScanType};

pub const AUDIT_SYSTEM_INSTRUCTION: &str = "Act as a Senior Security Architect. Perform a deep defensive audit focusing on OWASP. No exploits.";

pub const FORGE_SYSTEM_INSTRUCTION: &str = "Act as a Lead Security QA Engineer. Synthesize defensive Gherkin features and API negative test cases. No exploits.";

pub const WEB3_SYSTEM_INSTRUCTION: &str = "Act as a Senior Smart Contract Auditor. Perform a deep defensive security review of Solidity code. Focus on fund safety and state atomicity. No exploit payloads.";

const STANDARD_PROMPT: &str = r#"Mode: {mode}
Target Type: {type}

### TARGET CONTENT
{content}

### INSTRUCTIONS
1. Identify logic flaws and vulnerabilities.
2. Calculate Risk Score (0-100).
{mode_instruction}

Return strict JSON matching the schema."#;

const WEB3_PROMPT: &str = r#"Perform a Web3 Guard defensive review.

### TARGET SOURCE CODE
{content}

### INSTRUCTIONS
1. Identify vulnerabilities like Reentrancy, Access Control flaws, and Logic Errors.
2. Calculate Risk Score (0-100).
3. Provide remediation steps based on the Checks-Effects-Interactions pattern.

Return strict JSON matching the schema."#;

const AUDIT_INSTRUCTION: &str = "3. Provide findings and recommendations.";
const FORGE_INSTRUCTION: &str =
    "3. FORGE MODE ACTIVE: Generate Gherkin Features and API Negative Test Cases.";

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn system_instruction(profile: AnalysisProfile) -> &'static str {
        match profile {
            AnalysisProfile::Audit => AUDIT_SYSTEM_INSTRUCTION,
            AnalysisProfile::Forge => FORGE_SYSTEM_INSTRUCTION,
            AnalysisProfile::Web3 => WEB3_SYSTEM_INSTRUCTION,
        }
    }

    pub fn build_prompt(profile: AnalysisProfile, scan_type: ScanType, content: &str) -> String {
        match profile {
            AnalysisProfile::Web3 => WEB3_PROMPT.replace("{content}", content),
            AnalysisProfile::Audit => Self::standard(ScanMode::Audit, scan_type, content),
            AnalysisProfile::Forge => Self::standard(ScanMode::Forge, scan_type, content),
        }
    }

    fn standard(mode: ScanMode, scan_type: ScanType, content: &str) -> String {
        let mode_instruction = match mode {
            ScanMode::Audit => AUDIT_INSTRUCTION,
            ScanMode::Forge => FORGE_INSTRUCTION,
        };
        STANDARD_PROMPT
            .replace("{mode}", &mode.to_string())
            .replace("{type}", &scan_type.to_string())
            .replace("{content}", content)
            .replace("{mode_instruction}", mode_instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forge_prompt_activates_test_synthesis() {
        let prompt =
            PromptBuilder::build_prompt(AnalysisProfile::Forge, ScanType::OpenApi, "spec body");
        assert!(prompt.contains("Mode: FORGE"));
        assert!(prompt.contains("FORGE MODE ACTIVE"));
        assert!(prompt.contains("spec body"));
    }

    #[test]
    fn test_audit_prompt_has_no_forge_instruction() {
        let prompt = PromptBuilder::build_prompt(AnalysisProfile::Audit, ScanType::JavaCode, "x");
        assert!(prompt.contains("Mode: AUDIT"));
        assert!(!prompt.contains("FORGE MODE"));
    }

    #[test]
    fn test_web3_prompt_ignores_scan_type_placeholder() {
        let prompt =
            PromptBuilder::build_prompt(AnalysisProfile::Web3, ScanType::SmartContract, "contract");
        assert!(prompt.contains("Web3 Guard"));
        assert!(!prompt.contains("{type}"));
    }
}
