//! Social Cluster Construction
//!
//! Builds a fresh `DisjointSet` from the interaction graph on every call:
//! 1. Every post registers its author and records `post id -> author`.
//! 2. Every reply to a known post registers the replier and unions them with the post's author.
//!    Replies to unknown posts are skipped; the graph may be incomplete.
//! 3. The resulting partition is returned as id lists, or expanded into profile documents.
//!
//! A failure reading posts or replies aborts the whole computation, since there is no earlier
//! state to fall back on. Profile lookups are per member and only drop that member on failure.

use super::disjoint_set::DisjointSet;
use super::source::InteractionSource;
use super::types::{PostRecord, Profile, ReplyRecord};

use anyhow::{Context, Result};
use std::collections::HashMap;

/// Clusters the interaction graph given by `posts` and `replies`.
pub fn cluster_interactions<P, R>(posts: P, replies: R) -> DisjointSet<String>
where
    P: IntoIterator<Item = PostRecord>,
    R: IntoIterator<Item = ReplyRecord>,
{
    let mut set = DisjointSet::new();
    let mut post_authors: HashMap<String, String> = HashMap::new();

    for post in posts {
        if post.id.trim().is_empty() || post.author_id.trim().is_empty() {
            continue;
        }
        set.add(&post.author_id);
        post_authors.insert(post.id, post.author_id);
    }

    let mut skipped = 0usize;
    for reply in replies {
        if reply.post_id.trim().is_empty() || reply.author_id.trim().is_empty() {
            continue;
        }

        match post_authors.get(&reply.post_id) {
            Some(author) => {
                set.add(&reply.author_id);
                set.union(author, &reply.author_id);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} replies to unknown posts", skipped);
    }

    set
}

/// Groups of user ids that interact with each other.
pub async fn build_social_clusters(source: &dyn InteractionSource) -> Result<Vec<Vec<String>>> {
    let posts = source.posts().await.context("Failed to read posts")?;
    let replies = source.replies().await.context("Failed to read replies")?;

    tracing::debug!(
        "Clustering {} posts and {} replies",
        posts.len(),
        replies.len()
    );

    let clusters = cluster_interactions(posts, replies).clusters();

    tracing::info!("Found {} social clusters", clusters.len());
    Ok(clusters)
}

/// Like `build_social_clusters`, with every id replaced by its profile document.
///
/// Members whose profile is missing or cannot be read are left out of their cluster.
pub async fn build_social_clusters_expanded(
    source: &dyn InteractionSource,
) -> Result<Vec<Vec<Profile>>> {
    let clusters = build_social_clusters(source).await?;

    let mut expanded = Vec::with_capacity(clusters.len());
    for group in clusters {
        let mut members = Vec::with_capacity(group.len());
        for user_id in group {
            match source.profile(&user_id).await {
                Ok(Some(profile)) => members.push(profile),
                Ok(None) => {
                    tracing::debug!("No profile for user {}, dropping from cluster", user_id);
                }
                Err(e) => {
                    tracing::warn!("Failed to load profile for user {}: {}", user_id, e);
                }
            }
        }
        expanded.push(members);
    }

    Ok(expanded)
}
