//! Vocabulary Source
//!
//! Boundary to the external exercise catalog. `fetch_vocabulary` walks the catalog page by
//! page and returns the de-duplicated list of names; `HttpVocabularySource` is the HTTP-backed
//! implementation.
//!
//! ## Paging Rules
//! 1. Request pages of `page_size` by offset.
//! 2. On a rate-limit response, pause and request the **same** page again (bounded).
//! 3. Stop on an empty page, a short page without a "next page" signal, a self-contained
//!    response, or after `max_pages`.

use super::types::PageFetch;
use crate::config::VocabularyConfig;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Fetches one page of the catalog starting at `offset`.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PageFetch>;
}

/// Walks every page of `source` and returns the catalog's names, trimmed and de-duplicated
/// case-insensitively (first spelling wins).
pub async fn fetch_vocabulary(
    source: &dyn VocabularySource,
    config: &VocabularyConfig,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    let mut offset = 0;
    let mut page = 0;
    let mut rate_limited = 0;
    let mut complete = false;

    tracing::info!("Fetching exercise vocabulary");

    while page < config.max_pages {
        let (page_names, more) = match source.fetch_page(offset, config.page_size).await? {
            PageFetch::RateLimited => {
                rate_limited += 1;
                if rate_limited > config.rate_limit_retries {
                    return Err(anyhow!(
                        "Rate limited {} times in a row at offset {}",
                        rate_limited,
                        offset
                    ));
                }
                tracing::warn!(
                    "Rate limited by vocabulary source, retrying offset {} in {:?}",
                    offset,
                    config.rate_limit_pause
                );
                pause(config.rate_limit_pause).await;
                continue;
            }
            PageFetch::Page { names, next_page } => {
                let more = !names.is_empty() && (names.len() >= config.page_size || next_page);
                (names, more)
            }
            PageFetch::Final { names } => (names, false),
        };
        rate_limited = 0;

        let empty_page = page_names.is_empty();
        for name in page_names {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                names.push(name.to_string());
            }
        }

        page += 1;
        if !more {
            complete = true;
            tracing::info!(
                "Reached end of vocabulary (empty page: {}). Total fetched: {}",
                empty_page,
                names.len()
            );
            break;
        }
        if page % 10 == 0 {
            tracing::info!("Fetched {} pages, {} exercises so far", page, names.len());
        }

        offset += config.page_size;
        pause(config.page_delay).await;
    }

    if !complete {
        tracing::warn!(
            "Hit the {} page limit, the catalog may hold more exercises",
            config.max_pages
        );
    }

    tracing::info!("Fetched {} unique exercises across {} pages", names.len(), page);
    Ok(names)
}

async fn pause(base: Duration) {
    if base.is_zero() {
        return;
    }
    let jitter = rand::random::<u64>() % 50;
    tokio::time::sleep(base + Duration::from_millis(jitter)).await;
}

/// Reads a catalog response body.
///
/// Accepts `{ "data": [{ "name": .. }], "metadata": { "nextPage": .. } }` or a bare list of
/// `{ "name": .. }` objects. Any other shape is treated as an empty, final response.
pub fn parse_catalog_page(body: Value) -> PageFetch {
    match body {
        Value::Object(mut object) => {
            let names = match object.remove("data") {
                Some(Value::Array(items)) => extract_names(items),
                _ => Vec::new(),
            };
            let next_page = object
                .get("metadata")
                .and_then(|metadata| metadata.get("nextPage"))
                .is_some_and(is_truthy);

            PageFetch::Page { names, next_page }
        }
        Value::Array(items) => PageFetch::Final {
            names: extract_names(items),
        },
        _ => PageFetch::Final { names: Vec::new() },
    }
}

fn extract_names(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item.get("name") {
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Catalog reachable over HTTP, queried with `?offset=..&limit=..`.
pub struct HttpVocabularySource {
    url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpVocabularySource {
    pub fn new(config: &VocabularyConfig) -> Self {
        Self {
            url: config.url.clone(),
            timeout: config.request_timeout,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VocabularySource for HttpVocabularySource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PageFetch> {
        let response = self
            .http_client
            .get(&self.url)
            .query(&[("offset", offset), ("limit", limit)])
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Ok(PageFetch::RateLimited);
        }
        if !response.status().is_success() {
            return Err(anyhow!(
                "Vocabulary request failed at offset {}: {}",
                offset,
                response.status()
            ));
        }

        let body: Value = response.json().await?;
        Ok(parse_catalog_page(body))
    }
}
