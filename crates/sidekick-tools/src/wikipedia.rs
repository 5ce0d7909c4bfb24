use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use std::collections::HashMap;

use crate::param;
use crate::tool::{ParameterDefinition, Tool, ToolOutput, ToolParameters};

/// Wikipedia REST API base
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/api/rest_v1";

/// Identifies sidekick to Wikipedia; anonymous clients get throttled
pub const DEFAULT_USER_AGENT: &str = "sidekick-rs";

pub const EMPTY_QUERY_REPLY: &str = "Please provide a search keyword.";
pub const NOT_FOUND_REPLY: &str = "No matching article found.";

/// Client for the page summary endpoint
///
/// [`WikipediaClient::lookup`] never fails: every outcome, errors included, is
/// a line of text meant for the model.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new(WIKIPEDIA_API_URL)
    }
}

impl WikipediaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn summary_url(&self, query: &str) -> String {
        format!("{}/page/summary/{}", self.base_url, urlencoding::encode(query))
    }

    /// Short plain-text summary for `query`
    pub async fn lookup(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_REPLY.to_string();
        }

        match self.fetch_summary(query).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(query, error = %e, "wikipedia lookup failed");
                format!("Lookup failed: {}", e)
            }
        }
    }

    async fn fetch_summary(&self, query: &str) -> Result<String, reqwest::Error> {
        let url = self.summary_url(query);
        tracing::debug!(%url, "fetching wikipedia summary");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(format!("Lookup failed ({})", status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(body
            .get("extract")
            .and_then(Value::as_str)
            .filter(|extract| !extract.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NOT_FOUND_REPLY.to_string()))
    }
}

/// Tool for looking up a topic on Wikipedia
pub struct SearchWikipediaTool {
    client: WikipediaClient,
}

impl SearchWikipediaTool {
    pub fn new(client: WikipediaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchWikipediaTool {
    fn name(&self) -> &str {
        "searchWikipedia"
    }

    fn description(&self) -> &str {
        "Search Wikipedia and return a concise summary of the best matching article"
    }

    fn parameters(&self) -> HashMap<String, ParameterDefinition> {
        HashMap::from([param!("query", "string", "Search keyword or article title", required)])
    }

    async fn execute(&self, params: ToolParameters) -> ToolOutput {
        // Missing query degrades to the empty-query reply; scalars are stringified
        let query = match params.data.get("query") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(query)) => query.clone(),
            Some(other) => other.to_string(),
        };
        ToolOutput::success(self.client.lookup(&query).await)
    }
}
