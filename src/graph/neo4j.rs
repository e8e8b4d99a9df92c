use super::GraphFactProvider;
use crate::config::GraphSettings;
use crate::error::CurationError;
use crate::models::Triple;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// The only query the engine issues.
const FACT_QUERY: &str = "MATCH (s)-[r]->(o) WHERE s.value = $subject AND type(r) IN $relations \
                          RETURN s.value, type(r), o.value";

/// Neo4j reached through its HTTP transactional endpoint.
pub struct Neo4jGraph {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

impl Neo4jGraph {
    pub fn new(settings: &GraphSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build Neo4j HTTP client")?;
        let endpoint = format!(
            "{}/db/{}/tx/commit",
            settings.url.trim_end_matches('/'),
            settings.database
        );
        Ok(Self {
            client,
            endpoint,
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GraphFactProvider for Neo4jGraph {
    fn raw_facts(&self, subject: &str, relations: &[&str]) -> Result<Vec<Triple>, CurationError> {
        let body = json!({
            "statements": [{
                "statement": FACT_QUERY,
                "parameters": { "subject": subject, "relations": relations }
            }]
        });
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .map_err(|err| CurationError::graph_failure(subject, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CurationError::graph_failure(
                subject,
                format!("HTTP {status}"),
            ));
        }
        let parsed: TxResponse = response
            .json()
            .map_err(|err| CurationError::graph_failure(subject, err))?;
        if let Some(error) = parsed.errors.first() {
            return Err(CurationError::graph_failure(
                subject,
                format!("{}: {}", error.code, error.message),
            ));
        }

        let mut facts = Vec::new();
        for result in parsed.results {
            for row in result.data {
                if let [s, r, o] = row.row.as_slice() {
                    facts.push(Triple::new(value_text(s), value_text(r), value_text(o)));
                } else {
                    return Err(CurationError::graph_failure(
                        subject,
                        format!("expected 3 columns, got {}", row.row.len()),
                    ));
                }
            }
        }
        debug!(subject, ?relations, rows = facts.len(), "graph query");
        Ok(facts)
    }
}

/// Renders a returned node property; non-string properties use their JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
