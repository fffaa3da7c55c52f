//! Fitness Engines Library
//!
//! In-process engines behind a fitness social platform's services. The binary (`main.rs`)
//! wires them to configuration and owns the background lifecycle.
//!
//! ## Modules
//! The crate is made of three independent engines plus shared configuration:
//!
//! - **`ranking`**: A max-priority queue and the feed/workout ranking built on it. Higher
//!   priority is served first; feed posts rank by recency or likes, workouts by intensity.
//! - **`autocomplete`**: A trie-backed exercise-name index. Vocabulary is pulled page by page
//!   from an external catalog, merged with a built-in supplementary list and refreshed on a
//!   schedule without exposing half-built state to readers.
//! - **`clustering`**: Social clusters computed with union-find over the post/reply graph,
//!   optionally expanded into profile documents.
//! - **`config`**: Environment-driven settings with logged defaults.

pub mod autocomplete;
pub mod clustering;
pub mod config;
pub mod ranking;
