//! Raw analysis documents and reports used across integration tests

use serde_json::{Value, json};

/// Audit document with one HIGH SQL-injection finding.
pub fn audit_document() -> Value {
    json!({
        "summary": "One injectable endpoint found in the user lookup handler.",
        "riskScore": 78,
        "findings": [{
            "category": "INPUT_VALIDATION",
            "severity": "HIGH",
            "title": "SQL injection in getUser",
            "description": "Path and query parameters are concatenated into the SQL string.",
            "recommendation": "Use bound parameters via a prepared statement.",
            "evidence": {
                "endpoint": "/user/{id}",
                "reason": "String-built SELECT with untrusted id and name"
            }
        }],
        "quickFixChecklist": [
            "Replace string concatenation with parameterized queries",
            "Add an allow-list validator for the name parameter"
        ]
    })
}

/// Forge document: the audit facet plus synthesized test artifacts.
pub fn forge_document() -> Value {
    let mut document = audit_document();
    document["gherkinFeatures"] = json!([{
        "name": "User lookup input hardening",
        "content": "Feature: User lookup input hardening\n  Scenario: Rejects SQL metacharacters\n    Given the API is running\n    When I request /user/1' OR '1'='1\n    Then the response status is 400"
    }]);
    document["apiTestCases"] = json!([{
        "title": "Rejects injected name parameter",
        "steps": [
            "Send GET /user/1?name=' OR 1=1 --",
            "Capture the response status and body"
        ],
        "expected": "400 Bad Request with no SQL error leakage"
    }]);
    document
}

/// Web3 document with one CRITICAL reentrancy finding.
pub fn web3_document() -> Value {
    json!({
        "summary": "Withdrawal path is vulnerable to classic reentrancy.",
        "riskScore": 92,
        "web3Findings": [{
            "category": "REENTRANCY_RISK",
            "severity": "CRITICAL",
            "title": "Reentrancy in withdraw()",
            "description": "External call executes before the balance is zeroed.",
            "recommendation": "Zero the balance before the external call."
        }],
        "safeChecklist": [
            "Apply checks-effects-interactions in withdraw()",
            "Add a reentrancy guard to all fund-moving functions"
        ]
    })
}
