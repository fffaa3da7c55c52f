//! Exercise Index
//!
//! Owns the process-wide `PrefixIndex` together with its last-updated stamp, both behind one
//! async mutex. Readers take the mutex for the whole of a single query, and a rebuild holds it
//! for the clear-and-reinsert loop only, so a query sees either the old or the new vocabulary,
//! never a mix.
//!
//! ## Rebuild Flow
//! 1. Take the refresh gate so concurrent rebuild requests run one after another.
//! 2. Unless forced, skip when another rebuild finished within the refresh interval.
//! 3. Fetch the catalog **without** holding the index lock.
//! 4. On an empty fetch keep the current words (or seed the supplementary terms when empty).
//! 5. Otherwise add the supplementary terms, then clear and reinsert under the lock.

use super::source::{VocabularySource, fetch_vocabulary};
use super::trie::{PrefixIndex, normalize};
use super::types::{RebuildOutcome, SUPPLEMENTARY_EXERCISES, SuggestionResponse};
use crate::config::{IndexConfig, VocabularyConfig};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

struct IndexState {
    trie: PrefixIndex,
    last_updated: Option<Instant>,
}

pub struct ExerciseIndex {
    state: Mutex<IndexState>,
    /// Serializes rebuilds; never held by readers.
    refresh_gate: Mutex<()>,
    source: Arc<dyn VocabularySource>,
    vocabulary: VocabularyConfig,
    config: IndexConfig,
}

impl ExerciseIndex {
    pub fn new(
        source: Arc<dyn VocabularySource>,
        vocabulary: VocabularyConfig,
        config: IndexConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(IndexState {
                trie: PrefixIndex::new(),
                last_updated: None,
            }),
            refresh_gate: Mutex::new(()),
            source,
            vocabulary,
            config,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Replaces the vocabulary with a fresh copy from the source.
    ///
    /// A failed or empty fetch never clears a populated index.
    pub async fn rebuild(&self, force: bool) -> RebuildOutcome {
        let _gate = self.refresh_gate.lock().await;

        if !force {
            let state = self.state.lock().await;
            if let Some(last_updated) = state.last_updated {
                if last_updated.elapsed() < self.config.refresh_interval && !state.trie.is_empty()
                {
                    tracing::debug!(
                        "Exercise index is up to date ({} exercises)",
                        state.trie.len()
                    );
                    return RebuildOutcome::UpToDate {
                        words: state.trie.len(),
                    };
                }
            }
        }

        tracing::info!("Rebuilding exercise index (forced: {})", force);

        let mut names = match fetch_vocabulary(self.source.as_ref(), &self.vocabulary).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Failed to fetch exercise vocabulary: {:#}", e);
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;

        if names.is_empty() {
            if !state.trie.is_empty() {
                tracing::warn!(
                    "No exercises fetched, keeping existing index with {} exercises",
                    state.trie.len()
                );
                return RebuildOutcome::Retained {
                    words: state.trie.len(),
                };
            }

            tracing::error!("Exercise index is empty and the fetch returned nothing");
            for term in SUPPLEMENTARY_EXERCISES {
                state.trie.insert(term);
            }
            return RebuildOutcome::Seeded {
                words: state.trie.len(),
            };
        }

        let added = merge_supplementary(&mut names);
        if added > 0 {
            tracing::debug!("Added {} supplementary exercises", added);
        }

        state.trie.clear();
        for name in &names {
            state.trie.insert(name);
        }
        state.last_updated = Some(Instant::now());

        tracing::info!(
            "Exercise index rebuilt with {} exercises",
            state.trie.len()
        );
        RebuildOutcome::Rebuilt {
            words: state.trie.len(),
        }
    }

    /// Autocomplete suggestions for `prefix`, building the index first if no catalog fetch has
    /// succeeded yet (empty, or holding only the seeded supplementary terms).
    ///
    /// Substring matches are mixed in only when the normalized prefix has at least
    /// `substring_min_chars` characters.
    pub async fn suggest(&self, prefix: &str, max_results: usize) -> Vec<String> {
        if self.needs_build().await {
            tracing::info!("Exercise index has not been built from the catalog, building now");
            let outcome = self.rebuild(false).await;
            if outcome.words() == 0 {
                tracing::warn!("Exercise index build produced no exercises");
            }
        }

        let allow_substring = normalize(prefix).chars().count() >= self.config.substring_min_chars;

        let state = self.state.lock().await;
        let suggestions = state.trie.autocomplete(prefix, max_results, allow_substring);

        tracing::debug!(
            "Autocomplete for {:?}: {} suggestions",
            prefix,
            suggestions.len()
        );
        suggestions
    }

    /// `suggest` with the configured default result count, wrapped for serialization.
    pub async fn suggestion_response(&self, prefix: &str) -> SuggestionResponse {
        let suggestions = self.suggest(prefix, self.config.default_max_results).await;
        SuggestionResponse {
            prefix: prefix.to_string(),
            count: suggestions.len(),
            suggestions,
        }
    }

    pub async fn search(&self, word: &str) -> bool {
        self.state.lock().await.trie.search(word)
    }

    pub async fn starts_with(&self, prefix: &str) -> bool {
        self.state.lock().await.trie.starts_with(prefix)
    }

    pub async fn all_words(&self) -> Vec<String> {
        self.state.lock().await.trie.all_words()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.trie.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.trie.is_empty()
    }

    pub async fn last_updated(&self) -> Option<Instant> {
        self.state.lock().await.last_updated
    }

    async fn needs_build(&self) -> bool {
        let state = self.state.lock().await;
        state.trie.is_empty() || state.last_updated.is_none()
    }
}

/// Appends supplementary terms missing from `names` (case-insensitive). Returns how many.
fn merge_supplementary(names: &mut Vec<String>) -> usize {
    let mut seen: HashSet<String> = names.iter().map(|name| name.to_lowercase()).collect();
    let mut added = 0;

    for term in SUPPLEMENTARY_EXERCISES {
        if seen.insert(term.to_lowercase()) {
            names.push(term.to_string());
            added += 1;
        }
    }

    added
}
