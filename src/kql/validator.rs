use serde::{Deserialize, Serialize};

/// Outcome of the lexical pre-check. Never an error: malformed input comes
/// back as `valid: false` with the reasons listed in order of detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Structural pre-check for a KQL query string.
///
/// Two checks, in fixed order: the trimmed query must be non-empty, and `(`
/// and `)` counts over the raw string must match. This is a lexical heuristic
/// only; it does not parse KQL grammar, operator names, table references, or
/// pipe semantics.
pub fn validate_syntax(query: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if query.trim().is_empty() {
        errors.push("Query is empty".to_string());
    }

    let open = query.matches('(').count();
    let close = query.matches(')').count();
    if open != close {
        errors.push("Unmatched parentheses".to_string());
    }

    if errors.is_empty() {
        ValidationResult {
            valid: true,
            errors,
            message: Some("Query syntax appears valid".to_string()),
        }
    } else {
        ValidationResult { valid: false, errors, message: None }
    }
}
