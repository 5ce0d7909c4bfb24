use sidekick_types::ToolDefinition;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::tool::{Tool, ToolParameters};
use crate::wikipedia::{SearchWikipediaTool, WikipediaClient};

/// Every tool the model can be offered, keyed by the name it uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolKind {
    SearchWikipedia,
}

impl ToolKind {
    pub const ALL: [ToolKind; 1] = [ToolKind::SearchWikipedia];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::SearchWikipedia => "searchWikipedia",
        }
    }

    /// Resolve a model supplied tool name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Registry mapping tool kinds to their handlers
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<ToolKind, Arc<dyn Tool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults(wikipedia: WikipediaClient) -> Self {
        let mut registry = Self::new();
        registry.register(ToolKind::SearchWikipedia, SearchWikipediaTool::new(wikipedia));
        registry
    }

    /// Register a handler; the tool's name must match its kind
    pub fn register<T: Tool + 'static>(&mut self, kind: ToolKind, tool: T) {
        debug_assert_eq!(kind.as_str(), tool.name(), "tool name must match its kind");
        self.tools.insert(kind, Arc::new(tool));
    }

    /// Get a tool by model supplied name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        ToolKind::from_name(name).and_then(|kind| self.tools.get(&kind).cloned())
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.keys().map(ToolKind::as_str).collect()
    }

    /// Execute a tool by name, always producing text for the model
    pub async fn execute_tool(&self, name: &str, params: ToolParameters) -> String {
        match self.get_tool(name) {
            Some(tool) => {
                let output = tool.execute(params).await;
                if !output.success {
                    tracing::warn!(tool = name, error = ?output.error, "tool execution failed");
                }
                output.into_content()
            }
            None => {
                tracing::warn!(tool = name, "model requested an unknown tool");
                format!("Tool not implemented: {}", name)
            }
        }
    }

    /// All tool definitions in OpenAI format, ordered by kind
    pub fn openai_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.to_openai_definition())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("searchwikipedia"), None);
        assert_eq!(ToolKind::from_name(""), None);
    }

    #[test]
    fn test_default_registry_declares_search() {
        let registry = ToolRegistry::with_defaults(WikipediaClient::default());
        assert_eq!(registry.tool_names(), vec!["searchWikipedia"]);
        assert!(registry.get_tool("searchWikipedia").is_some());
        assert!(registry.get_tool("searchwikipedia").is_none());

        let definitions = registry.openai_definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].function.name, "searchWikipedia");
        assert_eq!(definitions[0].function.parameters["required"][0], "query");
    }

    #[tokio::test]
    async fn test_unknown_tool_reports_not_implemented() {
        let registry = ToolRegistry::with_defaults(WikipediaClient::default());
        let content = registry
            .execute_tool("getWeather", ToolParameters::default())
            .await;
        assert_eq!(content, "Tool not implemented: getWeather");
    }

    #[tokio::test]
    async fn test_known_kind_without_handler_reports_not_implemented() {
        let registry = ToolRegistry::new();
        assert!(registry.tool_names().is_empty());
        let content = registry
            .execute_tool("searchWikipedia", ToolParameters::default())
            .await;
        assert_eq!(content, "Tool not implemented: searchWikipedia");
    }
}
