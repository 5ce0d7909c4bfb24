use async_trait::async_trait;
use serde_json::{Map, Value};
use sidekick_types::ToolDefinition;
use std::collections::HashMap;

/// Tool parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolParameters {
    pub data: HashMap<String, Value>,
}

impl ToolParameters {
    pub fn from_json(json_str: &str) -> serde_json::Result<Self> {
        let data: HashMap<String, Value> = serde_json::from_str(json_str)?;
        Ok(Self { data })
    }

    /// Parse model supplied arguments, falling back to an empty object
    ///
    /// A blank payload, malformed JSON and non-object JSON all yield empty
    /// parameters so one bad call cannot abort its batch.
    pub fn from_json_or_empty(json_str: &str) -> Self {
        if json_str.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(json_str).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "tool arguments are not a JSON object, using empty arguments");
            Self::default()
        })
    }
}

/// Tool execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub content: String,
    pub error: Option<String>,
}

impl ToolOutput {
    pub fn success(content: String) -> Self {
        Self {
            success: true,
            content,
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
        }
    }

    /// Text handed back to the model, failures included
    pub fn into_content(self) -> String {
        if self.success {
            self.content
        } else {
            format!(
                "Tool execution failed: {}",
                self.error.unwrap_or_else(|| "unknown error".to_string())
            )
        }
    }
}

/// Tool parameter definition
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    pub param_type: String,
    pub description: String,
    pub required: bool,
}

/// Tool trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name of the tool as the model sees it (must be unique)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Parameter definitions
    fn parameters(&self) -> HashMap<String, ParameterDefinition>;

    /// Execute the tool
    async fn execute(&self, params: ToolParameters) -> ToolOutput;

    /// Get OpenAI-compatible tool definition
    fn to_openai_definition(&self) -> ToolDefinition {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, param_def) in self.parameters() {
            let mut param_json = Map::new();
            param_json.insert("type".to_string(), Value::String(param_def.param_type));
            param_json.insert("description".to_string(), Value::String(param_def.description));
            properties.insert(name.clone(), Value::Object(param_json));

            if param_def.required {
                required.push(name);
            }
        }
        required.sort();

        ToolDefinition::function(
            self.name(),
            self.description(),
            serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": required
            }),
        )
    }
}

/// Helper macro for creating parameter definitions
#[macro_export]
macro_rules! param {
    ($name:expr, $type:expr, $desc:expr, required) => {
        (
            $name.to_string(),
            $crate::tool::ParameterDefinition {
                param_type: $type.to_string(),
                description: $desc.to_string(),
                required: true,
            },
        )
    };
}
