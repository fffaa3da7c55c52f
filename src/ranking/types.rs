use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single heap slot: caller-supplied priority plus an opaque payload.
///
/// Entries carry no identity; equal priorities and equal payloads are allowed
/// and treated independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry<T> {
    pub priority: i64,
    pub payload: T,
}

impl<T> From<(i64, T)> for RankedEntry<T> {
    fn from((priority, payload): (i64, T)) -> Self {
        Self { priority, payload }
    }
}

/// Rejection raised when a loosely typed priority cannot be read as an integer.
#[derive(Error, Debug, PartialEq)]
pub enum PriorityError {
    #[error("priority is required")]
    Missing,

    #[error("priority must be an integer, got {0}")]
    NotAnInteger(String),
}

/// Ordering applied to a community feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    /// Most recent `created_at` first.
    #[default]
    Latest,
    /// Highest like count first.
    MostLiked,
}

/// A community post as handed over by the store layer.
///
/// Only the fields used for ranking are typed; everything else rides along in `extra`
/// and is serialized back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedPost {
    pub id: String,
    #[serde(alias = "author_uid")]
    pub author_id: String,
    #[serde(default)]
    pub likes: i64,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A logged set of an exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub id: u64,
    pub name: String,
    pub weight: f64,
    pub reps: i64,
    pub sets: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A workout entry annotated with its derived intensity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedWorkout {
    #[serde(flatten)]
    pub entry: WorkoutEntry,
    pub intensity: i64,
}
