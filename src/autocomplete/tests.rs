//! Autocomplete Module Tests
//!
//! ## Test Scopes
//! - **Trie**: Normalization, exact/prefix lookup, ordering, substring fallback.
//! - **Source**: Catalog parsing, paging termination, rate-limit retries.
//! - **Index**: Rebuild outcomes, failure handling, concurrency and the scheduled refresher.

#[cfg(test)]
mod tests {
    use crate::autocomplete::index::ExerciseIndex;
    use crate::autocomplete::refresher::IndexRefresher;
    use crate::autocomplete::source::{VocabularySource, fetch_vocabulary, parse_catalog_page};
    use crate::autocomplete::trie::{PrefixIndex, normalize};
    use crate::autocomplete::types::{PageFetch, RebuildOutcome, SUPPLEMENTARY_EXERCISES};
    use crate::config::{IndexConfig, VocabularyConfig};

    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Replays queued responses in order; once exhausted, answers with an empty final page.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<PageFetch>>>,
        offsets: Mutex<Vec<usize>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<PageFetch>>) -> Arc<Self> {
            Self::with_delay(responses, Duration::ZERO)
        }

        fn with_delay(responses: Vec<Result<PageFetch>>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                offsets: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VocabularySource for ScriptedSource {
        async fn fetch_page(&self, offset: usize, _limit: usize) -> Result<PageFetch> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.offsets.lock().unwrap().push(offset);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or(Ok(PageFetch::Final { names: Vec::new() }))
        }
    }

    fn final_page(names: &[&str]) -> Result<PageFetch> {
        Ok(PageFetch::Final {
            names: names.iter().map(|n| n.to_string()).collect(),
        })
    }

    fn quick_vocabulary() -> VocabularyConfig {
        VocabularyConfig {
            page_size: 2,
            max_pages: 50,
            page_delay: Duration::ZERO,
            rate_limit_pause: Duration::ZERO,
            rate_limit_retries: 3,
            ..VocabularyConfig::default()
        }
    }

    fn index_with(source: Arc<ScriptedSource>) -> Arc<ExerciseIndex> {
        ExerciseIndex::new(source, quick_vocabulary(), IndexConfig::default())
    }

    // ============================================================
    // TRIE TESTS
    // ============================================================

    #[test]
    fn test_normalization_is_idempotent() {
        let mut trie = PrefixIndex::new();
        trie.insert("Bench Press");
        trie.insert("bench press");
        trie.insert(" BENCH PRESS ");

        assert_eq!(trie.len(), 1);
        assert_eq!(trie.all_words(), vec!["bench press"]);
        assert!(trie.search("BENCH press"));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut trie = PrefixIndex::new();
        trie.insert("");
        trie.insert("   ");

        assert!(trie.is_empty());
        assert!(!trie.search(""));
        assert!(!trie.starts_with("  "));
        assert!(trie.autocomplete("", 10, true).is_empty());
    }

    #[test]
    fn test_prefix_autocomplete() {
        let trie: PrefixIndex = ["squat", "squat jump", "deadlift"].into_iter().collect();

        let results = trie.autocomplete("squ", 10, false);

        assert_eq!(results, vec!["squat", "squat jump"]);
        assert!(!results.contains(&"deadlift".to_string()));
    }

    #[test]
    fn test_search_vs_starts_with() {
        let trie: PrefixIndex = ["squat jump"].into_iter().collect();

        assert!(trie.starts_with("Squat"));
        assert!(!trie.search("squat"), "A prefix alone is not a stored word");
        assert!(trie.contains("SQUAT JUMP"));
        assert!(!trie.starts_with("lunge"));
    }

    #[test]
    fn test_all_words_lexicographic_preorder() {
        let trie: PrefixIndex = ["row", "Deadlift", "dead bug", "dip", "rowing"]
            .into_iter()
            .collect();

        assert_eq!(
            trie.all_words(),
            vec!["dead bug", "deadlift", "dip", "row", "rowing"]
        );
    }

    #[test]
    fn test_autocomplete_respects_max_results() {
        let trie: PrefixIndex = ["press a", "press b", "press c", "press d"].into_iter().collect();

        assert_eq!(trie.autocomplete("press", 2, false), vec!["press a", "press b"]);
        assert!(trie.autocomplete("press", 0, true).is_empty());
    }

    #[test]
    fn test_substring_fallback_appends_without_duplicates() {
        let trie: PrefixIndex = ["curl up", "hammer curl", "preacher curl", "squat"]
            .into_iter()
            .collect();

        let without = trie.autocomplete("curl", 5, false);
        assert_eq!(without, vec!["curl up"]);

        let with = trie.autocomplete("curl", 5, true);
        assert_eq!(with, vec!["curl up", "hammer curl", "preacher curl"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut trie: PrefixIndex = ["plank", "pull up"].into_iter().collect();
        trie.clear();

        assert_eq!(trie.len(), 0);
        assert!(!trie.starts_with("p"));
        assert!(trie.all_words().is_empty());
    }

    #[test]
    fn test_deep_word_does_not_overflow() {
        let long_word = "a".repeat(100_000);
        let mut trie = PrefixIndex::new();
        trie.insert(&long_word);

        assert_eq!(trie.autocomplete("aaa", 5, false).len(), 1);
        assert_eq!(trie.all_words().len(), 1);
        trie.clear();
        assert!(trie.is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Lat Pulldown \t"), "lat pulldown");
        assert_eq!(normalize(""), "");
    }

    // ============================================================
    // SOURCE TESTS
    // ============================================================

    #[test]
    fn test_parse_catalog_page_wrapped() {
        let body = json!({
            "success": true,
            "data": [{"name": "Push Up"}, {"name": "Dip"}, {"id": 3}],
            "metadata": {"nextPage": "https://catalog/next", "totalCount": 40}
        });

        assert_eq!(
            parse_catalog_page(body),
            PageFetch::Page {
                names: vec!["Push Up".to_string(), "Dip".to_string()],
                next_page: true
            }
        );
    }

    #[test]
    fn test_parse_catalog_page_without_next() {
        let body = json!({"data": [{"name": "Plank"}], "metadata": {"nextPage": null}});

        assert_eq!(
            parse_catalog_page(body),
            PageFetch::Page {
                names: vec!["Plank".to_string()],
                next_page: false
            }
        );
    }

    #[test]
    fn test_parse_catalog_page_bare_list_and_garbage() {
        assert_eq!(
            parse_catalog_page(json!([{"name": "Lunge"}])),
            PageFetch::Final {
                names: vec!["Lunge".to_string()]
            }
        );
        assert_eq!(
            parse_catalog_page(json!("nope")),
            PageFetch::Final { names: Vec::new() }
        );
    }

    #[tokio::test]
    async fn test_fetch_walks_pages_until_done() {
        let source = ScriptedSource::new(vec![
            Ok(PageFetch::Page {
                names: vec!["Bench Press".to_string(), "Squat".to_string()],
                next_page: false,
            }),
            Ok(PageFetch::Page {
                names: vec!["bench press".to_string()],
                next_page: true,
            }),
            Ok(PageFetch::Page {
                names: vec!["  Row  ".to_string(), "".to_string()],
                next_page: false,
            }),
            final_page(&["Farmer Carry"]),
        ]);

        let names = fetch_vocabulary(source.as_ref(), &quick_vocabulary())
            .await
            .expect("Fetch should succeed");

        // Third page is full (size 2) so the walk continues to the scripted fourth one.
        assert_eq!(names, vec!["Bench Press", "Squat", "Row", "Farmer Carry"]);
        assert_eq!(*source.offsets.lock().unwrap(), vec![0, 2, 4, 6]);
    }

    #[tokio::test]
    async fn test_fetch_stops_on_short_page_without_next() {
        let source = ScriptedSource::new(vec![
            Ok(PageFetch::Page {
                names: vec!["Plank".to_string()],
                next_page: false,
            }),
            final_page(&["unreachable"]),
        ]);

        let names = fetch_vocabulary(source.as_ref(), &quick_vocabulary())
            .await
            .unwrap();

        assert_eq!(names, vec!["Plank"]);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_retries_same_page_when_rate_limited() {
        let source = ScriptedSource::new(vec![
            Ok(PageFetch::RateLimited),
            Ok(PageFetch::RateLimited),
            final_page(&["Dip"]),
        ]);

        let names = fetch_vocabulary(source.as_ref(), &quick_vocabulary())
            .await
            .unwrap();

        assert_eq!(names, vec!["Dip"]);
        assert_eq!(*source.offsets.lock().unwrap(), vec![0, 0, 0]);
    }

    #[tokio::test]
    async fn test_fetch_gives_up_after_rate_limit_budget() {
        let source = ScriptedSource::new(
            (0..10).map(|_| Ok(PageFetch::RateLimited)).collect(),
        );

        let result = fetch_vocabulary(source.as_ref(), &quick_vocabulary()).await;

        assert!(result.is_err());
        // Initial attempt plus three retries.
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_fetch_respects_max_pages() {
        let pages = (0..10)
            .map(|i| {
                Ok(PageFetch::Page {
                    names: vec![format!("a{}", i), format!("b{}", i)],
                    next_page: true,
                })
            })
            .collect();
        let source = ScriptedSource::new(pages);
        let config = VocabularyConfig {
            max_pages: 3,
            ..quick_vocabulary()
        };

        let names = fetch_vocabulary(source.as_ref(), &config).await.unwrap();

        assert_eq!(names.len(), 6);
        assert_eq!(source.calls(), 3);
    }

    // ============================================================
    // INDEX TESTS
    // ============================================================

    #[tokio::test]
    async fn test_rebuild_merges_supplementary_terms() {
        let source = ScriptedSource::new(vec![final_page(&["Squat", "LAT PULLDOWN"])]);
        let index = index_with(source);

        let outcome = index.rebuild(true).await;

        // "lat pulldown" is supplementary too, so it is only counted once.
        let expected = 1 + SUPPLEMENTARY_EXERCISES.len();
        assert_eq!(outcome, RebuildOutcome::Rebuilt { words: expected });
        assert_eq!(index.len().await, expected);
        assert!(index.search("squat").await);
        assert!(index.search("Preacher Curl").await);
        assert!(index.last_updated().await.is_some());
    }

    #[tokio::test]
    async fn test_recent_rebuild_is_not_repeated() {
        let source = ScriptedSource::new(vec![final_page(&["Squat"]), final_page(&["Lunge"])]);
        let index = index_with(source.clone());

        assert!(matches!(index.rebuild(false).await, RebuildOutcome::Rebuilt { .. }));
        assert!(matches!(index.rebuild(false).await, RebuildOutcome::UpToDate { .. }));
        assert_eq!(source.calls(), 1, "Second request must not hit the source");

        assert!(matches!(index.rebuild(true).await, RebuildOutcome::Rebuilt { .. }));
        assert!(index.search("lunge").await);
        assert!(!index.search("squat").await);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_vocabulary() {
        let source = ScriptedSource::new(vec![
            final_page(&["Squat", "Deadlift"]),
            Err(anyhow::anyhow!("catalog unreachable")),
        ]);
        let index = index_with(source);

        index.rebuild(true).await;
        let before_words = index.all_words().await;
        let before_len = index.len().await;

        let outcome = index.rebuild(true).await;

        assert_eq!(outcome, RebuildOutcome::Retained { words: before_len });
        assert_eq!(index.len().await, before_len);
        assert_eq!(index.all_words().await, before_words);
    }

    #[tokio::test]
    async fn test_empty_fetch_keeps_vocabulary() {
        let source = ScriptedSource::new(vec![final_page(&["Squat"]), final_page(&[])]);
        let index = index_with(source);

        index.rebuild(true).await;
        let before = index.all_words().await;

        assert!(matches!(index.rebuild(true).await, RebuildOutcome::Retained { .. }));
        assert_eq!(index.all_words().await, before);
    }

    #[tokio::test]
    async fn test_cold_failure_seeds_supplementary_terms() {
        let source = ScriptedSource::new(vec![Err(anyhow::anyhow!("down"))]);
        let index = index_with(source);

        let outcome = index.rebuild(false).await;

        assert_eq!(
            outcome,
            RebuildOutcome::Seeded {
                words: SUPPLEMENTARY_EXERCISES.len()
            }
        );
        assert!(index.search("t-bar row").await);
        assert!(index.last_updated().await.is_none(), "Seeding is not a refresh");
    }

    #[tokio::test]
    async fn test_seeded_index_retries_catalog_on_next_request() {
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("down")),
            Err(anyhow::anyhow!("still down")),
            final_page(&["Zercher Squat"]),
        ]);
        let index = index_with(source.clone());

        // Cold failure: only the supplementary terms are available.
        assert!(index.suggest("zer", 10).await.is_empty());
        assert_eq!(source.calls(), 1);
        assert_eq!(index.len().await, SUPPLEMENTARY_EXERCISES.len());

        // The catalog is still down; the seed stays in place.
        assert!(index.suggest("zer", 10).await.is_empty());
        assert_eq!(source.calls(), 2);
        assert!(index.search("t-bar row").await);
        assert!(index.last_updated().await.is_none());

        // The catalog is back; the next request picks it up.
        assert_eq!(index.suggest("zer", 10).await, vec!["zercher squat"]);
        assert_eq!(source.calls(), 3);
        assert!(index.last_updated().await.is_some());

        // Built from the catalog now, so further requests stay local.
        index.suggest("zer", 10).await;
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_suggest_builds_empty_index_lazily() {
        let source = ScriptedSource::new(vec![final_page(&["Goblet Squat", "Squat"])]);
        let index = index_with(source.clone());

        let suggestions = index.suggest("squ", 10).await;

        assert_eq!(source.calls(), 1);
        // Prefix hit first, then the substring match.
        assert_eq!(suggestions, vec!["squat", "goblet squat"]);
    }

    #[tokio::test]
    async fn test_substring_fallback_needs_three_characters() {
        let source = ScriptedSource::new(vec![final_page(&["Hammer Curl", "Curl Up", "Push Up"])]);
        let index = index_with(source);
        index.rebuild(true).await;

        let two = index.suggest("cu", 5).await;
        assert_eq!(two, vec!["curl up"], "No substring matches for a 2-character prefix");

        let three = index.suggest("cur", 5).await;
        assert_eq!(
            three,
            vec!["curl up", "barbell curl", "hammer curl", "preacher curl"]
        );
    }

    #[tokio::test]
    async fn test_suggestion_response_uses_default_limit() {
        let names: Vec<String> = (0..20).map(|i| format!("zercher {:02}", i)).collect();
        let source = ScriptedSource::new(vec![Ok(PageFetch::Final { names })]);
        let index = index_with(source);

        let response = index.suggestion_response("Zer").await;

        assert_eq!(response.count, index.config().default_max_results);
        assert_eq!(response.count, 10);
        assert_eq!(response.suggestions[0], "zercher 00");
        assert_eq!(response.prefix, "Zer");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rebuilds_collapse() {
        let source = ScriptedSource::with_delay(
            vec![final_page(&["Squat"]), final_page(&["Lunge"])],
            Duration::from_millis(50),
        );
        let index = index_with(source.clone());

        let first = tokio::spawn({
            let index = index.clone();
            async move { index.rebuild(false).await }
        });
        let second = tokio::spawn({
            let index = index.clone();
            async move { index.rebuild(false).await }
        });

        let outcomes = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(source.calls(), 1);
        assert!(outcomes.iter().any(|o| matches!(o, RebuildOutcome::Rebuilt { .. })));
        assert!(outcomes.iter().any(|o| matches!(o, RebuildOutcome::UpToDate { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_partial_rebuild() {
        let old: Vec<String> = (0..30).map(|i| format!("zottman a{:02}", i)).collect();
        let new: Vec<String> = (0..60).map(|i| format!("zottman b{:02}", i)).collect();
        let source = ScriptedSource::with_delay(
            vec![
                Ok(PageFetch::Final { names: old }),
                Ok(PageFetch::Final { names: new }),
            ],
            Duration::from_millis(20),
        );
        let index = index_with(source);
        index.rebuild(true).await;

        let mut readers = Vec::new();
        for _ in 0..4 {
            let index = index.clone();
            readers.push(tokio::spawn(async move {
                let mut observed = Vec::new();
                for _ in 0..200 {
                    observed.push(index.suggest("zo", 1000).await.len());
                    tokio::task::yield_now().await;
                }
                observed
            }));
        }

        index.rebuild(true).await;

        for reader in readers {
            for count in reader.await.unwrap() {
                assert!(count == 30 || count == 60, "Observed torn vocabulary of {}", count);
            }
        }
        assert_eq!(index.suggest("zo", 1000).await.len(), 60);
    }

    // ============================================================
    // REFRESHER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_refresher_builds_on_start_and_stops() {
        let source = ScriptedSource::new(vec![final_page(&["Farmer Carry"])]);
        let index = index_with(source);

        let refresher = IndexRefresher::start(index.clone(), Duration::from_secs(3600));

        let mut waited = 0;
        while index.is_empty().await && waited < 100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            waited += 1;
        }
        assert!(index.search("farmer carry").await);
        assert!(!refresher.is_finished());

        refresher.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresher_forces_rebuild_every_interval() {
        let source = ScriptedSource::new(vec![
            final_page(&["Farmer Carry"]),
            final_page(&["Sled Push"]),
            final_page(&["Sled Pull"]),
        ]);
        let index = index_with(source.clone());
        let interval = Duration::from_secs(60);

        let refresher = IndexRefresher::start(index.clone(), interval);

        // First tick fires immediately.
        while source.calls() < 1 {
            tokio::task::yield_now().await;
        }
        while !index.search("farmer carry").await {
            tokio::task::yield_now().await;
        }
        assert_eq!(source.calls(), 1);

        // Well inside the recency window, yet the scheduled tick still refetches.
        tokio::time::advance(interval).await;
        while !index.search("sled push").await {
            tokio::task::yield_now().await;
        }
        assert_eq!(source.calls(), 2);
        assert!(!index.search("farmer carry").await);

        refresher.stop().await;

        tokio::time::advance(interval * 3).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(source.calls(), 2, "No ticks after stop");
        assert!(index.search("sled push").await);
    }
}
