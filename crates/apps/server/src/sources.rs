//! Upstream JSON documents: country boundaries and country info (flags).
//!
//! Every fetch goes through the `JsonSource` trait so handlers can be driven
//! by an in-memory source in tests. Failures never reach the renderer: the
//! boundary load degrades to an empty collection and the flag lookup to no
//! flag.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use formats::BoundaryCollection;
use reqwest::Url;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Error type for upstream fetches.
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches a JSON document by URL.
pub trait JsonSource: Send + Sync {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SourceError>>;
}

pub struct HttpJsonSource {
    client: reqwest::Client,
}

impl HttpJsonSource {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::with_source("failed to build HTTP client", e))?;
        Ok(Self { client })
    }
}

impl JsonSource for HttpJsonSource {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SourceError>> {
        Box::pin(async move {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| SourceError::with_source("HTTP request failed", e))?;

            if !resp.status().is_success() {
                return Err(SourceError::new(format!("HTTP error: {}", resp.status())));
            }

            resp.json::<Value>()
                .await
                .map_err(|e| SourceError::with_source("invalid JSON response", e))
        })
    }
}

/// Documents keyed by exact URL. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct MemoryJsonSource {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryJsonSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_document(&self, url: impl Into<String>, doc: Value) {
        self.documents.write().await.insert(url.into(), doc);
    }
}

impl JsonSource for MemoryJsonSource {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SourceError>> {
        Box::pin(async move {
            self.documents
                .read()
                .await
                .get(url)
                .cloned()
                .ok_or_else(|| SourceError::new(format!("no document for {url}")))
        })
    }
}

/// Boundary dataset from `path` if given, else from `url`. Any failure is
/// logged and yields an empty collection.
pub async fn load_boundaries(
    source: &dyn JsonSource,
    url: &str,
    path: Option<&Path>,
) -> BoundaryCollection {
    let doc = match path {
        Some(path) => read_json_file(path).await,
        None => source.fetch_json(url).await,
    };
    let parsed = doc.and_then(|value| {
        BoundaryCollection::from_geojson_value(&value)
            .map_err(|e| SourceError::with_source("unusable boundary document", e))
    });
    match parsed {
        Ok(collection) => {
            info!("loaded {} boundary features", collection.features.len());
            collection
        }
        Err(err) => {
            error!("failed to load boundaries: {err}");
            BoundaryCollection::default()
        }
    }
}

async fn read_json_file(path: &Path) -> Result<Value, SourceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SourceError::with_source(format!("failed to read {}", path.display()), e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| SourceError::with_source(format!("invalid JSON in {}", path.display()), e))
}

/// Lookup URLs for a country's info record, most specific first: exact
/// full-name match, then partial match. Empty if `base` is not a usable URL.
pub fn flag_endpoints(base: &str, name: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base) else {
        debug!("country info base is not a URL: {base}");
        return Vec::new();
    };
    let mut by_name = base;
    match by_name.path_segments_mut() {
        Ok(mut segments) => {
            segments.pop_if_empty().push("name").push(name);
        }
        Err(()) => return Vec::new(),
    }

    let mut full_text = by_name.clone();
    full_text.query_pairs_mut().append_pair("fullText", "true");
    vec![full_text.to_string(), by_name.to_string()]
}

/// Walks [`flag_endpoints`] in order. Each attempt is isolated: a transport
/// error, a non-success status, or a response without a usable flag moves
/// on to the next endpoint. The first flag found wins.
pub async fn lookup_flag(source: &dyn JsonSource, base: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    for url in flag_endpoints(base, name) {
        match source.fetch_json(&url).await {
            Ok(doc) => match flag_from_response(&doc) {
                Some(flag) => return Some(flag),
                None => debug!("no flag in response from {url}"),
            },
            Err(err) => debug!("flag lookup via {url} failed: {err}"),
        }
    }
    None
}

/// First record's `flags.svg`, else `flags.png`. Empty strings do not count.
fn flag_from_response(doc: &Value) -> Option<String> {
    let flags = doc.as_array()?.first()?.get("flags")?;
    ["svg", "png"]
        .iter()
        .filter_map(|k| flags.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
