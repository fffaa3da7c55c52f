//! Exercise Autocomplete Module
//!
//! Prefix/typeahead lookup over the exercise vocabulary, backed by a trie that is rebuilt
//! wholesale from an external catalog.
//!
//! ## Responsibilities
//! - **Indexing**: Normalized (trimmed, case-folded) storage with exact, prefix and substring lookup.
//! - **Refresh**: Paginated catalog fetch with rate-limit pauses, merged with always-included terms.
//! - **Consistency**: One lock guards reads and the rebuild's insert loop, so queries never see
//!   a partially rebuilt vocabulary, and failed fetches never wipe a working index.
//! - **Scheduling**: A cancellable periodic refresher tied to the service lifecycle.
//!
//! ## Submodules
//! - **`trie`**: The `PrefixIndex` data structure.
//! - **`source`**: Catalog boundary trait, page walker and the HTTP implementation.
//! - **`index`**: Lock-guarded `ExerciseIndex` with rebuild and suggestion policy.
//! - **`refresher`**: Background refresh task and its shutdown handle.
//! - **`types`**: Page, outcome and response types plus the supplementary term list.

pub mod index;
pub mod refresher;
pub mod source;
pub mod trie;
pub mod types;

#[cfg(test)]
mod tests;
