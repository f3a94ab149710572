use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::watch;

/// A knowledge document value, classified once at load time so rendering
/// and matching can switch exhaustively instead of re-inspecting JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeValue {
    Scalar(String),
    List(Vec<String>),
    /// Object entries in document key order.
    Nested(Vec<(String, KnowledgeValue)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub tag: String,
    pub patterns: Vec<String>,
    pub response: String,
}

/// The loaded knowledge document: declared intents plus the remaining
/// top-level entries in document order. Immutable for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    pub intents: Vec<Intent>,
    pub entries: Vec<(String, KnowledgeValue)>,
}

impl KnowledgeBase {
    /// Classify a parsed JSON document. The reserved top-level `intents`
    /// key is extracted here and does not participate in key matching.
    pub fn from_json(doc: Value) -> Self {
        let Value::Object(map) = doc else {
            tracing::warn!("knowledge document root is not an object, treating as empty");
            return Self::default();
        };

        let mut intents = Vec::new();
        let mut entries = Vec::new();

        for (key, value) in map {
            if key == "intents" {
                intents = parse_intents(&value);
            } else {
                entries.push((key, classify(&value)));
            }
        }

        Self { intents, entries }
    }

    pub fn get(&self, key: &str) -> Option<&KnowledgeValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn intent(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.tag == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty() && self.entries.is_empty()
    }
}

fn parse_intents(value: &Value) -> Vec<Intent> {
    let Some(items) = value.as_array() else {
        tracing::warn!("intents key is not an array, ignoring");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let tag = item.get("tag")?.as_str()?.to_string();
            let response = item.get("response")?.as_str()?.to_string();
            let patterns = item
                .get("patterns")?
                .as_array()?
                .iter()
                .filter_map(|p| p.as_str().map(str::to_string))
                .collect();
            Some(Intent {
                tag,
                patterns,
                response,
            })
        })
        .collect()
}

fn classify(value: &Value) -> KnowledgeValue {
    match value {
        Value::Array(items) => KnowledgeValue::List(items.iter().map(scalar_text).collect()),
        Value::Object(map) => KnowledgeValue::Nested(
            map.iter()
                .map(|(k, v)| (k.clone(), classify(v)))
                .collect(),
        ),
        other => KnowledgeValue::Scalar(scalar_text(other)),
    }
}

/// Text form of a leaf value. Non-scalar list items collapse to their
/// compact JSON text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Handle to the knowledge document, shared between the matcher and the
/// widget. The document loads once in a background task; readiness is a
/// one-shot notification rather than a polled flag, and callers can always
/// distinguish "still loading" from "loaded but matched nothing".
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    rx: watch::Receiver<Option<Arc<KnowledgeBase>>>,
}

impl KnowledgeStore {
    /// Spawn the one-time load of a JSON knowledge document. A load
    /// failure logs and publishes an empty base so callers never block
    /// forever; every utterance then falls through to the relay.
    pub fn spawn_load(path: impl Into<PathBuf>) -> Self {
        let (tx, rx) = watch::channel(None);
        let path = path.into();
        tokio::spawn(async move {
            let base = match load_document(&path).await {
                Ok(base) => {
                    tracing::info!(
                        path = %path.display(),
                        entries = base.entries.len(),
                        intents = base.intents.len(),
                        "knowledge loaded"
                    );
                    base
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "failed to load knowledge");
                    KnowledgeBase::default()
                }
            };
            let _ = tx.send(Some(Arc::new(base)));
        });
        Self { rx }
    }

    /// Store that is ready immediately. Used by `validate` and tests.
    pub fn preloaded(base: KnowledgeBase) -> Self {
        let (_tx, rx) = watch::channel(Some(Arc::new(base)));
        Self { rx }
    }

    /// An unresolved store plus its publish side, for callers that manage
    /// loading themselves.
    pub fn pending() -> (watch::Sender<Option<Arc<KnowledgeBase>>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self { rx })
    }

    /// Current document, or `None` while the load is still in flight.
    pub fn get(&self) -> Option<Arc<KnowledgeBase>> {
        self.rx.borrow().clone()
    }

    /// Await the loaded document.
    pub async fn ready(&self) -> Arc<KnowledgeBase> {
        let mut rx = self.rx.clone();
        loop {
            if let Some(base) = rx.borrow_and_update().clone() {
                return base;
            }
            if rx.changed().await.is_err() {
                // Publisher dropped without loading; behave as empty.
                return Arc::new(KnowledgeBase::default());
            }
        }
    }
}

async fn load_document(path: &Path) -> Result<KnowledgeBase> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let doc: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(KnowledgeBase::from_json(doc))
}
