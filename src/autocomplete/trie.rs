//! Prefix Index (Trie)
//!
//! Stores normalized words (trimmed, lowercased) one character per edge. Children are kept in a
//! `BTreeMap`, so every walk visits them in ascending character order and all listings come out
//! in case-folded lexicographic pre-order.
//!
//! Word collection uses an explicit stack instead of recursion, so long vocabulary entries
//! cannot exhaust the call stack.

use std::collections::{BTreeMap, HashSet};

/// Trims surrounding whitespace and case-folds.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    /// Set on terminal nodes only; holds the full normalized word.
    word: Option<String>,
}

impl TrieNode {
    fn is_end_of_word(&self) -> bool {
        self.word.is_some()
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Tear down iteratively; the default drop would recurse once per character.
        let mut stack: Vec<TrieNode> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    size: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the normalized form of `word`. Blank input is ignored and re-inserting an
    /// existing word leaves the count unchanged.
    pub fn insert(&mut self, word: &str) {
        let word = normalize(word);
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        if !node.is_end_of_word() {
            node.word = Some(word);
            self.size += 1;
        }
    }

    /// Exact match on the normalized form.
    pub fn search(&self, word: &str) -> bool {
        let word = normalize(word);
        if word.is_empty() {
            return false;
        }

        self.walk(&word).is_some_and(TrieNode::is_end_of_word)
    }

    /// Whether any stored word begins with the normalized prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let prefix = normalize(prefix);
        if prefix.is_empty() {
            return false;
        }

        self.walk(&prefix).is_some()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.search(word)
    }

    /// Up to `max_results` words starting with `prefix`, in pre-order.
    ///
    /// With `allow_substring_fallback`, an under-filled result is topped up with stored words
    /// that contain the prefix anywhere, skipping words already collected.
    pub fn autocomplete(
        &self,
        prefix: &str,
        max_results: usize,
        allow_substring_fallback: bool,
    ) -> Vec<String> {
        let prefix = normalize(prefix);
        if prefix.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        if let Some(node) = self.walk(&prefix) {
            collect_words(node, &mut results, max_results);
        }

        if allow_substring_fallback && results.len() < max_results {
            let mut seen: HashSet<String> = results.iter().map(|w| w.to_lowercase()).collect();
            for word in self.all_words() {
                if results.len() >= max_results {
                    break;
                }
                if word.contains(&prefix) && seen.insert(word.to_lowercase()) {
                    results.push(word);
                }
            }
        }

        results
    }

    /// Every stored word, in pre-order.
    pub fn all_words(&self) -> Vec<String> {
        let mut results = Vec::with_capacity(self.size);
        collect_words(&self.root, &mut results, usize::MAX);
        results
    }

    /// Drops every word. Used as the first step of a rebuild.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.size = 0;
    }

    /// Number of distinct normalized words.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn walk(&self, normalized: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in normalized.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

/// Pre-order collection from `start`, stopping as soon as `results` holds `max_results` words.
fn collect_words(start: &TrieNode, results: &mut Vec<String>, max_results: usize) {
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if results.len() >= max_results {
            return;
        }
        if let Some(word) = &node.word {
            results.push(word.clone());
        }
        // Reverse so the smallest character is popped first.
        stack.extend(node.children.values().rev());
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = PrefixIndex::new();
        for word in iter {
            index.insert(word.as_ref());
        }
        index
    }
}
