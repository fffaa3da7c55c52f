//! Interaction Graph Source
//!
//! Read-only boundary to the document store holding posts, replies and user profiles.
//! `MemoryInteractionStore` is a concurrent in-process implementation.

use super::types::{PostRecord, Profile, ReplyRecord};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

#[async_trait]
pub trait InteractionSource: Send + Sync {
    async fn posts(&self) -> Result<Vec<PostRecord>>;

    async fn replies(&self) -> Result<Vec<ReplyRecord>>;

    /// Profile document for `user_id`, or `None` when no such user exists.
    async fn profile(&self, user_id: &str) -> Result<Option<Profile>>;
}

/// In-memory store keyed like the external collections.
///
/// Uses `DashMap` so writers and the clustering reader can work concurrently.
#[derive(Default)]
pub struct MemoryInteractionStore {
    posts: DashMap<String, PostRecord>,
    /// Structure: `reply id -> ReplyRecord`.
    replies: DashMap<String, ReplyRecord>,
    profiles: DashMap<String, Profile>,
}

impl MemoryInteractionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put_post(&self, post: PostRecord) {
        self.posts.insert(post.id.clone(), post);
    }

    pub fn put_reply(&self, reply_id: &str, reply: ReplyRecord) {
        self.replies.insert(reply_id.to_string(), reply);
    }

    pub fn put_profile(&self, user_id: &str, profile: Profile) {
        self.profiles.insert(user_id.to_string(), profile);
    }

    pub fn remove_post(&self, post_id: &str) -> Option<PostRecord> {
        self.posts.remove(post_id).map(|(_, post)| post)
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl InteractionSource for MemoryInteractionStore {
    async fn posts(&self) -> Result<Vec<PostRecord>> {
        Ok(self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn replies(&self) -> Result<Vec<ReplyRecord>> {
        Ok(self
            .replies
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }
}
