//! Social Clustering Module
//!
//! Discovers groups of users connected through post/reply interactions, using a
//! disjoint-set-union structure rebuilt from scratch for each request.
//!
//! ## Core Concepts
//! - **Interaction**: a reply links its author with the author of the post it answers.
//! - **Cluster**: a maximal set of users reachable through such links.
//! - **Expansion**: optional replacement of every user id with its stored profile.
//!
//! Nothing is shared between requests, so the engine needs no synchronization.
//!
//! ## Submodules
//! - **`disjoint_set`**: Arena-backed union-find with path compression and union by rank.
//! - **`graph`**: Cluster construction from posts and replies, plus profile expansion.
//! - **`source`**: Store boundary trait and the in-memory `MemoryInteractionStore`.
//! - **`types`**: Post, reply and response types.

pub mod disjoint_set;
pub mod graph;
pub mod source;
pub mod types;
