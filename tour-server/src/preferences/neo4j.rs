//! Neo4j-backed preference store.
//!
//! Talks to the Neo4j HTTP transactional endpoint. Each preference is a
//! `(:User {id})-[:HAS_PREFERENCE]->(:Preference {key, value})` pair with
//! the value stored as a string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{PreferenceError, PreferenceStore, Preferences};
use crate::domain::UserId;

/// Default database name.
const DEFAULT_DATABASE: &str = "neo4j";

/// Replace one preference value for a user.
const SAVE_PREFERENCE: &str = "\
MERGE (u:User {id: $user_id})
WITH u
OPTIONAL MATCH (u)-[r:HAS_PREFERENCE]->(old:Preference {key: $key})
DELETE r, old
WITH DISTINCT u
CREATE (u)-[:HAS_PREFERENCE]->(:Preference {key: $key, value: $value})";

const GET_PREFERENCES: &str = "\
MATCH (u:User {id: $user_id})-[:HAS_PREFERENCE]->(p:Preference)
RETURN p.key AS key, p.value AS value";

/// Configuration for the Neo4j store.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// HTTP base URI, e.g. `http://localhost:7474`.
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Neo4jConfig {
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Use a database other than the default.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.uri.trim_end_matches('/'),
            self.database
        )
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.user, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

#[derive(Debug, Serialize)]
struct TxRequest {
    statements: Vec<Statement>,
}

#[derive(Debug, Serialize)]
struct Statement {
    statement: &'static str,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    data: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    row: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

fn save_request(user: &UserId, preferences: &Preferences) -> TxRequest {
    let statements = preferences
        .to_pairs()
        .into_iter()
        .map(|(key, value)| Statement {
            statement: SAVE_PREFERENCE,
            parameters: serde_json::json!({
                "user_id": user.as_str(),
                "key": key,
                "value": value,
            }),
        })
        .collect();
    TxRequest { statements }
}

fn get_request(user: &UserId) -> TxRequest {
    TxRequest {
        statements: vec![Statement {
            statement: GET_PREFERENCES,
            parameters: serde_json::json!({ "user_id": user.as_str() }),
        }],
    }
}

/// Decode a transaction response body. Neo4j reports Cypher errors with a
/// 200 status, so the `errors` array is checked here.
fn parse_response(body: &str) -> Result<TxResponse, PreferenceError> {
    let response: TxResponse = serde_json::from_str(body).map_err(|e| PreferenceError::Json {
        message: e.to_string(),
    })?;

    if let Some(err) = response.errors.first() {
        return Err(PreferenceError::Backend {
            status: 200,
            message: format!("{}: {}", err.code, err.message),
        });
    }
    Ok(response)
}

/// Turn `key, value` rows back into preferences. `None` when there are no rows.
fn preferences_from_response(response: TxResponse) -> Result<Option<Preferences>, PreferenceError> {
    let mut pairs = Vec::new();
    for row in response.results.into_iter().flat_map(|r| r.data) {
        match row.row.as_slice() {
            [serde_json::Value::String(key), serde_json::Value::String(value)] => {
                pairs.push((key.clone(), value.clone()));
            }
            other => warn!(row = ?other, "Skipping malformed preference row"),
        }
    }

    if pairs.is_empty() {
        return Ok(None);
    }
    Preferences::from_pairs(pairs).map(Some)
}

/// Preference store that persists to Neo4j over HTTP.
#[derive(Debug, Clone)]
pub struct Neo4jPreferenceStore {
    http: reqwest::Client,
    commit_url: String,
}

impl Neo4jPreferenceStore {
    pub fn new(config: Neo4jConfig) -> Result<Self, PreferenceError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&config.basic_auth())
            .map_err(|_| PreferenceError::Config("credentials are not a valid header".into()))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            commit_url: config.commit_url(),
        })
    }

    async fn run(&self, request: &TxRequest) -> Result<TxResponse, PreferenceError> {
        let response = self.http.post(&self.commit_url).json(request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PreferenceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PreferenceError::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }

    async fn fetch(&self, user: &UserId) -> Result<Option<Preferences>, PreferenceError> {
        let response = self.run(&get_request(user)).await?;
        preferences_from_response(response)
    }
}

impl PreferenceStore for Neo4jPreferenceStore {
    fn save<'a>(
        &'a self,
        user: &'a UserId,
        preferences: Preferences,
    ) -> BoxFuture<'a, Result<Preferences, PreferenceError>> {
        async move {
            let request = save_request(user, &preferences);
            if !request.statements.is_empty() {
                self.run(&request).await?;
            }
            debug!(user = %user, keys = request.statements.len(), "Saved preferences to Neo4j");

            // Read back so the caller sees the merged view.
            Ok(self.fetch(user).await?.unwrap_or(preferences))
        }
        .boxed()
    }

    fn get<'a>(
        &'a self,
        user: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<Preferences>, PreferenceError>> {
        self.fetch(user).boxed()
    }

    fn backend(&self) -> &'static str {
        "neo4j"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cost;

    fn user(s: &str) -> UserId {
        UserId::parse(s).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = Neo4jConfig::new("http://localhost:7474", "neo4j", "secret");
        assert_eq!(config.database, "neo4j");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.commit_url(), "http://localhost:7474/db/neo4j/tx/commit");
    }

    #[test]
    fn config_with_database_and_trailing_slash() {
        let config =
            Neo4jConfig::new("http://db:7474/", "neo4j", "secret").with_database("tours");
        assert_eq!(config.commit_url(), "http://db:7474/db/tours/tx/commit");
    }

    #[test]
    fn basic_auth_header() {
        let config = Neo4jConfig::new("http://localhost:7474", "neo4j", "password");
        // base64("neo4j:password")
        assert_eq!(config.basic_auth(), "Basic bmVvNGo6cGFzc3dvcmQ=");
    }

    #[test]
    fn client_builds() {
        let config = Neo4jConfig::new("http://localhost:7474", "neo4j", "password");
        let store = Neo4jPreferenceStore::new(config).unwrap();
        assert_eq!(store.backend(), "neo4j");
    }

    #[test]
    fn save_request_has_one_statement_per_field() {
        let prefs = Preferences {
            city: Some("Berlin".into()),
            budget: Some(Cost::new(25.5).unwrap()),
            ..Default::default()
        };
        let request = save_request(&user("alice"), &prefs);
        assert_eq!(request.statements.len(), 2);

        let json = serde_json::to_value(&request).unwrap();
        let params = &json["statements"][0]["parameters"];
        assert_eq!(params["user_id"], "alice");
        assert_eq!(params["key"], "city");
        assert_eq!(params["value"], "Berlin");
        assert_eq!(json["statements"][1]["parameters"]["value"], "25.5");
    }

    #[test]
    fn save_request_for_empty_preferences() {
        let request = save_request(&user("alice"), &Preferences::default());
        assert!(request.statements.is_empty());
    }

    #[test]
    fn get_request_binds_user() {
        let json = serde_json::to_value(get_request(&user("bob"))).unwrap();
        assert_eq!(json["statements"][0]["parameters"]["user_id"], "bob");
    }

    #[test]
    fn parse_rows_into_preferences() {
        let body = r#"{
            "results": [{
                "columns": ["key", "value"],
                "data": [
                    {"row": ["city", "New York"], "meta": [null, null]},
                    {"row": ["budget", "40"], "meta": [null, null]},
                    {"row": ["interests", "nature,history"], "meta": [null, null]}
                ]
            }],
            "errors": []
        }"#;
        let prefs = preferences_from_response(parse_response(body).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(prefs.city.as_deref(), Some("New York"));
        assert_eq!(prefs.budget, Some(Cost::new(40.0).unwrap()));
        assert_eq!(prefs.interests.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn no_rows_means_no_preferences() {
        let body = r#"{"results": [{"columns": ["key", "value"], "data": []}], "errors": []}"#;
        let parsed = preferences_from_response(parse_response(body).unwrap()).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let body = r#"{"results": [{"data": [
            {"row": ["city"]},
            {"row": ["city", "Berlin"]}
        ]}], "errors": []}"#;
        let prefs = preferences_from_response(parse_response(body).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(prefs.city.as_deref(), Some("Berlin"));
    }

    #[test]
    fn cypher_errors_are_reported() {
        let body = r#"{"results": [], "errors": [
            {"code": "Neo.ClientError.Statement.SyntaxError", "message": "bad"}
        ]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, PreferenceError::Backend { ref message, .. }
            if message.contains("SyntaxError")));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            parse_response("<html>"),
            Err(PreferenceError::Json { .. })
        ));
    }
}
