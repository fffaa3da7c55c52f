//! Environment Configuration
//!
//! Every setting has a default; a variable that is set but cannot be parsed is an error
//! rather than a silent fallback.

use anyhow::{Context, Result};
use std::{
    env::{self, VarError},
    fmt::Display,
    str::FromStr,
    time::Duration,
};
use tracing::info;

pub const DEFAULT_VOCABULARY_URL: &str = "https://www.exercisedb.dev/api/v1/exercises";

/// How the paginated vocabulary catalog is walked.
#[derive(Debug, Clone)]
pub struct VocabularyConfig {
    pub url: String,
    pub page_size: usize,
    /// Safety cap on the number of pages requested in one refresh.
    pub max_pages: usize,
    /// Pause between successive pages.
    pub page_delay: Duration,
    /// Pause before re-requesting a page that was rate limited.
    pub rate_limit_pause: Duration,
    /// Consecutive rate-limit responses tolerated for a single page.
    pub rate_limit_retries: usize,
    pub request_timeout: Duration,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VOCABULARY_URL.to_string(),
            page_size: 100,
            max_pages: 200,
            page_delay: Duration::from_millis(500),
            rate_limit_pause: Duration::from_millis(2000),
            rate_limit_retries: 10,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Policy of the lock-guarded exercise index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Scheduled refresh period, also the "recently updated" window for non-forced rebuilds.
    pub refresh_interval: Duration,
    pub default_max_results: usize,
    /// Minimum normalized prefix length before substring matches are mixed in.
    pub substring_min_chars: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(24 * 60 * 60),
            default_max_results: 10,
            substring_min_chars: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub vocabulary: VocabularyConfig,
    pub index: IndexConfig,
}

impl EngineConfig {
    pub fn load() -> Result<Self> {
        let defaults = EngineConfig::default();

        Ok(Self {
            vocabulary: VocabularyConfig {
                url: try_load("VOCABULARY_URL", defaults.vocabulary.url)?,
                page_size: try_load("VOCABULARY_PAGE_SIZE", defaults.vocabulary.page_size)?,
                max_pages: try_load("VOCABULARY_MAX_PAGES", defaults.vocabulary.max_pages)?,
                page_delay: Duration::from_millis(try_load(
                    "VOCABULARY_PAGE_DELAY_MS",
                    defaults.vocabulary.page_delay.as_millis() as u64,
                )?),
                rate_limit_pause: Duration::from_millis(try_load(
                    "VOCABULARY_RATE_LIMIT_PAUSE_MS",
                    defaults.vocabulary.rate_limit_pause.as_millis() as u64,
                )?),
                rate_limit_retries: try_load(
                    "VOCABULARY_RATE_LIMIT_RETRIES",
                    defaults.vocabulary.rate_limit_retries,
                )?,
                request_timeout: Duration::from_secs(try_load(
                    "VOCABULARY_TIMEOUT_SECS",
                    defaults.vocabulary.request_timeout.as_secs(),
                )?),
            },
            index: IndexConfig {
                refresh_interval: Duration::from_secs(try_load(
                    "INDEX_REFRESH_INTERVAL_SECS",
                    defaults.index.refresh_interval.as_secs(),
                )?),
                default_max_results: try_load(
                    "AUTOCOMPLETE_MAX_RESULTS",
                    defaults.index.default_max_results,
                )?,
                substring_min_chars: try_load(
                    "AUTOCOMPLETE_SUBSTRING_MIN_CHARS",
                    defaults.index.substring_min_chars,
                )?,
            },
        })
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(VarError::NotPresent) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Err(e) => Err(e).with_context(|| format!("Invalid {key} value")),
    }
}
