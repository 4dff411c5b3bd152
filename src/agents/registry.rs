use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::CopilotError;
use crate::kql;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityName {
    DiscoverWorkspaces,
    ExecuteQuery,
    GetTableSchema,
    ValidateSyntax,
}

impl CapabilityName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiscoverWorkspaces => "discover-workspaces",
            Self::ExecuteQuery => "execute-query",
            Self::GetTableSchema => "get-table-schema",
            Self::ValidateSyntax => "validate-syntax",
        }
    }
}

impl std::fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Backed by real logic in this crate.
    Implemented,
    /// Declared but not built; invoking it yields `ToolOutcome::NotImplemented`
    /// carrying the documented sample payload.
    Placeholder,
}

pub struct CapabilityDefinition {
    pub name: CapabilityName,
    pub description: &'static str,
    pub kind: CapabilityKind,
}

pub static CAPABILITY_REGISTRY: LazyLock<Vec<CapabilityDefinition>> = LazyLock::new(|| vec![
    CapabilityDefinition {
        name: CapabilityName::DiscoverWorkspaces,
        description: "Discover Log Analytics workspaces the user has access to",
        kind: CapabilityKind::Placeholder,
    },
    CapabilityDefinition {
        name: CapabilityName::ExecuteQuery,
        description: "Execute a KQL query against a Log Analytics workspace",
        kind: CapabilityKind::Placeholder,
    },
    CapabilityDefinition {
        name: CapabilityName::GetTableSchema,
        description: "Get schema information for tables in a workspace",
        kind: CapabilityKind::Placeholder,
    },
    CapabilityDefinition {
        name: CapabilityName::ValidateSyntax,
        description: "Validate KQL query syntax without executing it",
        kind: CapabilityKind::Implemented,
    },
]);

/// Result of dispatching a capability. Placeholders are reported as such
/// instead of being disguised as successes, so callers and tests can tell
/// real functionality from stubs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Completed {
        capability: CapabilityName,
        result: Value,
    },
    NotImplemented {
        capability: CapabilityName,
        sample: Value,
    },
}

/// Startup check: every capability appears exactly once with a description.
pub fn validate_registry() -> Result<(), CopilotError> {
    let mut seen = std::collections::HashSet::new();
    for def in CAPABILITY_REGISTRY.iter() {
        if !seen.insert(def.name) {
            return Err(CopilotError::Config(format!(
                "Duplicate capability in registry: {}", def.name
            )));
        }
        if def.description.trim().is_empty() {
            return Err(CopilotError::Config(format!(
                "Capability {} has no description", def.name
            )));
        }
    }
    for name in [
        CapabilityName::DiscoverWorkspaces,
        CapabilityName::ExecuteQuery,
        CapabilityName::GetTableSchema,
        CapabilityName::ValidateSyntax,
    ] {
        if !seen.contains(&name) {
            return Err(CopilotError::Config(format!(
                "Capability {} missing from registry", name
            )));
        }
    }
    Ok(())
}

/// Dispatch a capability by name. `validate-syntax` runs the real pre-check;
/// the placeholders return their documented sample payloads.
pub fn invoke(name: CapabilityName, input: &Value) -> ToolOutcome {
    match name {
        CapabilityName::ValidateSyntax => {
            let query = input["query"].as_str().unwrap_or("");
            let result = kql::validate_syntax(query);
            ToolOutcome::Completed {
                capability: name,
                result: serde_json::to_value(result).unwrap_or(Value::Null),
            }
        }
        CapabilityName::DiscoverWorkspaces => ToolOutcome::NotImplemented {
            capability: name,
            sample: json!({
                "workspaces": [{
                    "name": "example-workspace",
                    "resourceGroup": "rg-example",
                    "subscriptionId": "sub-123",
                    "workspaceId": "workspace-guid",
                    "location": "usgovvirginia",
                }]
            }),
        },
        CapabilityName::ExecuteQuery => ToolOutcome::NotImplemented {
            capability: name,
            sample: json!({
                "status": "success",
                "rowCount": 10,
                "results": [],
            }),
        },
        CapabilityName::GetTableSchema => ToolOutcome::NotImplemented {
            capability: name,
            sample: json!({
                "schema": [
                    {"table": "Heartbeat", "column": "TimeGenerated", "type": "datetime"},
                    {"table": "Heartbeat", "column": "Computer", "type": "string"},
                ]
            }),
        },
    }
}
