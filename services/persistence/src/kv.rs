//! Managed key-value backend
//!
//! Talks to an Upstash-compatible REST endpoint. The ledger lives under a
//! single key as a JSON-encoded string:
//!
//! ```text
//! GET  {url}/get/{key}   -> {"result": "<json array>" | null}
//! POST {url}/set/{key}   <- "<json array>"
//!                        -> {"result": "OK"}
//! ```
//!
//! Every write replaces the whole value; atomicity is the store's.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use types::matches::MatchRecord;

use crate::normalize::{encode_ledger, normalize_ledger};
use crate::store::{Backend, LedgerStore, StoreError};

/// Default key holding the ledger.
pub const DEFAULT_KEY: &str = "matches";

#[derive(Debug, Deserialize)]
struct KvResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct KvStore {
    client: Client,
    base_url: String,
    token: String,
    key: String,
}

impl KvStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, token, key)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}/{}/{}", self.base_url, command, self.key)
    }

    async fn result_of(response: reqwest::Response) -> Result<Value, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        let parsed: KvResponse = serde_json::from_str(&body)
            .map_err(|_| StoreError::Kv(format!("unexpected response ({status}): {body}")))?;

        if let Some(error) = parsed.error {
            return Err(StoreError::Kv(error));
        }
        if !status.is_success() {
            return Err(StoreError::Kv(format!("request failed with status {status}")));
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl LedgerStore for KvStore {
    fn backend(&self) -> Backend {
        Backend::Kv
    }

    async fn read(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let response = self
            .client
            .get(self.command_url("get"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let stored = Self::result_of(response).await?;
        Ok(normalize_ledger(stored))
    }

    async fn write(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        let document = encode_ledger(matches)?;
        let response = self
            .client
            .post(self.command_url("set"))
            .bearer_auth(&self.token)
            .body(document)
            .send()
            .await?;

        match Self::result_of(response).await? {
            Value::String(ack) if ack == "OK" => Ok(()),
            other => Err(StoreError::Kv(format!("unexpected set result: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;
    use types::ids::RecordedAt;
    use types::matches::Outcome;

    const TOKEN: &str = "test-token";

    type Keys = Arc<Mutex<HashMap<String, String>>>;

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TOKEN}"))
    }

    async fn fake_get(
        State(keys): State<Keys>,
        headers: HeaderMap,
        Path(key): Path<String>,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
        }
        let value = keys.lock().unwrap().get(&key).cloned();
        (StatusCode::OK, Json(json!({ "result": value })))
    }

    async fn fake_set(
        State(keys): State<Keys>,
        headers: HeaderMap,
        Path(key): Path<String>,
        body: String,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
        }
        keys.lock().unwrap().insert(key, body);
        (StatusCode::OK, Json(json!({ "result": "OK" })))
    }

    /// Serve a minimal REST KV on an ephemeral port.
    async fn spawn_fake_kv(keys: Keys) -> String {
        let app = Router::new()
            .route("/get/{key}", get(fake_get))
            .route("/set/{key}", post(fake_set))
            .with_state(keys);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn record(a: &str, b: &str, millis: i64) -> MatchRecord {
        MatchRecord {
            participant_a: a.into(),
            participant_b: b.into(),
            outcome: Outcome::AWins,
            recorded_at: RecordedAt::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_key_reads_empty() {
        let url = spawn_fake_kv(Keys::default()).await;
        let store = KvStore::new(url, TOKEN, DEFAULT_KEY);
        assert!(store.read().await.unwrap().is_empty());
        assert_eq!(store.backend(), Backend::Kv);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let keys = Keys::default();
        let url = spawn_fake_kv(keys.clone()).await;
        let store = KvStore::new(format!("{url}/"), TOKEN, DEFAULT_KEY);

        let ledger = vec![record("alice", "bob", 1), record("bob", "carol", 2)];
        store.write(&ledger).await.unwrap();

        assert_eq!(store.read().await.unwrap(), ledger);
        let stored = keys.lock().unwrap().get(DEFAULT_KEY).cloned().unwrap();
        assert!(stored.starts_with('['));
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let url = spawn_fake_kv(Keys::default()).await;
        let first = KvStore::new(url.clone(), TOKEN, "league-a");
        let second = KvStore::new(url, TOKEN, "league-b");

        first.write(&[record("alice", "bob", 1)]).await.unwrap();
        assert!(second.read().await.unwrap().is_empty());
        assert_eq!(first.key(), "league-a");
    }

    #[tokio::test]
    async fn test_rejected_token_is_an_error() {
        let url = spawn_fake_kv(Keys::default()).await;
        let store = KvStore::new(url, "wrong", DEFAULT_KEY);

        match store.read().await {
            Err(StoreError::Kv(msg)) => assert_eq!(msg, "Unauthorized"),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(store.write(&[record("alice", "bob", 1)]).await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = KvStore::new(format!("http://{addr}"), TOKEN, DEFAULT_KEY);
        assert!(matches!(store.read().await, Err(StoreError::Http(_))));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_outcome() -> impl Strategy<Value = Outcome> {
            prop_oneof![Just(Outcome::AWins), Just(Outcome::BWins), Just(Outcome::Draw)]
        }

        fn arb_record() -> impl Strategy<Value = MatchRecord> {
            ("\\PC{1,12}", "\\PC{1,12}", arb_outcome(), 0i64..4_102_444_800_000)
                .prop_filter("participants must differ", |(a, b, _, _)| a != b)
                .prop_map(|(a, b, outcome, millis)| MatchRecord {
                    participant_a: a,
                    participant_b: b,
                    outcome,
                    recorded_at: RecordedAt::from_timestamp_millis(millis).unwrap(),
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(16))]

            #[test]
            fn prop_kv_round_trip(ledger in prop::collection::vec(arb_record(), 0..12)) {
                let rt = tokio::runtime::Runtime::new().unwrap();
                let read = rt.block_on(async {
                    let url = spawn_fake_kv(Keys::default()).await;
                    let store = KvStore::new(url, TOKEN, DEFAULT_KEY);
                    store.write(&ledger).await.unwrap();
                    store.read().await.unwrap()
                });
                prop_assert_eq!(read, ledger);
            }
        }
    }
}
