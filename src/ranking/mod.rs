//! Ranked Retrieval Module
//!
//! Orders records by a derived integer priority using an array-backed binary max-heap.
//!
//! ## Usage Modes
//! - **Transient**: build a `RankedQueue`, push every candidate, drain it. Nothing is shared,
//!   so no locking is involved (`scoring::rank_by`, `rank_posts`, `rank_workouts`).
//! - **Shared**: a single `SharedRankedQueue` held by the serving context; pushes and pops from
//!   independent calls are serialized by its internal mutex.
//!
//! ## Submodules
//! - **`heap`**: The binary heap itself (push/pop/peek/snapshot).
//! - **`shared`**: Mutex-guarded wrapper for the process-wide instance.
//! - **`scoring`**: Priority derivation (recency, likes, intensity, loose coercion) and ranking helpers.
//! - **`types`**: Entry, record and error types.

pub mod heap;
pub mod scoring;
pub mod shared;
pub mod types;
