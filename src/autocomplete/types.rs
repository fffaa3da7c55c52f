use serde::Serialize;

/// Exercises that are always part of the vocabulary, whatever the catalog returns.
pub const SUPPLEMENTARY_EXERCISES: &[&str] = &[
    "machine chest press",
    "machine chest fly",
    "machine dip",
    "machine shoulder press",
    "single-arm cable lateral raise",
    "tricep pushdown",
    "tricep overhead extension",
    "lat pulldown",
    "t-bar row",
    "single-arm cable row",
    "machine rear delt fly",
    "barbell curl",
    "preacher curl",
];

/// One response from the vocabulary catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum PageFetch {
    /// A page of names. `next_page` mirrors the catalog's "more pages" signal.
    Page { names: Vec<String>, next_page: bool },
    /// A response that is complete on its own (e.g. an unpaginated list).
    Final { names: Vec<String> },
    /// The catalog asked us to slow down; the same page should be requested again.
    RateLimited,
}

/// Result of a rebuild request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RebuildOutcome {
    /// The vocabulary was replaced with a freshly fetched one.
    Rebuilt { words: usize },
    /// Another rebuild finished within the refresh interval; nothing was fetched.
    UpToDate { words: usize },
    /// The fetch produced nothing and the previous vocabulary was kept.
    Retained { words: usize },
    /// The fetch produced nothing on an empty index; only the supplementary terms were loaded.
    Seeded { words: usize },
}

impl RebuildOutcome {
    pub fn words(&self) -> usize {
        match self {
            RebuildOutcome::Rebuilt { words }
            | RebuildOutcome::UpToDate { words }
            | RebuildOutcome::Retained { words }
            | RebuildOutcome::Seeded { words } => *words,
        }
    }
}

/// Serializable autocomplete answer.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub prefix: String,
    pub count: usize,
    pub suggestions: Vec<String>,
}
