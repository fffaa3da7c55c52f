//! Priority Derivation & Transient Ranking
//!
//! Helpers that turn store records into integer priorities and rank them with a
//! throwaway `RankedQueue` (construct, fill, drain within one call).

use super::heap::RankedQueue;
use super::types::{FeedPost, PostSort, PriorityError, RankedWorkout, WorkoutEntry};
use serde_json::Value;

/// Reads a loosely typed priority as an integer.
///
/// Accepts JSON integers, finite floats (truncated toward zero) and strings holding an integer.
/// Anything else is rejected.
pub fn coerce_priority(value: Option<&Value>) -> Result<i64, PriorityError> {
    match value {
        None | Some(Value::Null) => Err(PriorityError::Missing),
        Some(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.is_finite() && float.abs() < i64::MAX as f64 => {
                    Ok(float.trunc() as i64)
                }
                _ => Err(PriorityError::NotAnInteger(number.to_string())),
            }
        }
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| PriorityError::NotAnInteger(text.clone())),
        Some(other) => Err(PriorityError::NotAnInteger(other.to_string())),
    }
}

/// Workout intensity: `weight * reps * sets`, truncated. Non-finite results score 0.
pub fn intensity(weight: f64, reps: i64, sets: i64) -> i64 {
    let score = weight * reps as f64 * sets as f64;
    if score.is_finite() {
        score.trunc() as i64
    } else {
        0
    }
}

/// Ranks `items` in descending order of `priority_of`.
///
/// Equal priorities come out in an unspecified order.
pub fn rank_by<T, I, F>(items: I, mut priority_of: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> i64,
{
    let queue: RankedQueue<T> = items
        .into_iter()
        .map(|item| {
            let priority = priority_of(&item);
            (item, priority)
        })
        .collect();

    queue
        .into_sorted_vec()
        .into_iter()
        .map(|(_, item)| item)
        .collect()
}

pub fn post_priority(post: &FeedPost, sort: PostSort) -> i64 {
    match sort {
        PostSort::Latest => post.created_at.unwrap_or(0),
        PostSort::MostLiked => post.likes,
    }
}

pub fn rank_posts(posts: Vec<FeedPost>, sort: PostSort) -> Vec<FeedPost> {
    tracing::debug!("Ranking {} posts by {:?}", posts.len(), sort);
    rank_by(posts, |post| post_priority(post, sort))
}

/// Ranks workout entries by intensity, highest first, annotating each with its score.
pub fn rank_workouts(entries: Vec<WorkoutEntry>) -> Vec<RankedWorkout> {
    let scored = entries.into_iter().map(|entry| RankedWorkout {
        intensity: intensity(entry.weight, entry.reps, entry.sets),
        entry,
    });

    rank_by(scored, |workout| workout.intensity)
}
