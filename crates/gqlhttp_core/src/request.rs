//! GraphQL operation requests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One GraphQL operation to execute.
///
/// Built by whatever parsed the incoming body; the transport only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    /// The GraphQL document.
    pub query: String,
    /// Which operation of the document to run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Variable values keyed by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<IndexMap<String, serde_json::Value>>,
    /// Protocol extensions such as persisted query hashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<IndexMap<String, serde_json::Value>>,
}

impl OperationRequest {
    /// Creates a request for the given document.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Sets the operation name.
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Adds a variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.variables
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value);
        self
    }

    /// Adds an extension entry.
    pub fn with_extension(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value);
        self
    }

    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&serde_json::Value> {
        self.variables.as_ref().and_then(|vars| vars.get(name))
    }
}
