use serde::{Deserialize, Serialize};

/// Authorship of a community post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostRecord {
    pub id: String,
    #[serde(alias = "author_uid")]
    pub author_id: String,
}

/// Authorship of a reply, linked to the post it answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplyRecord {
    pub post_id: String,
    #[serde(alias = "user_uid")]
    pub author_id: String,
}

/// Full profile document of a user, passed through as stored.
pub type Profile = serde_json::Value;

/// Serializable clustering answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterResponse<T> {
    pub cluster_count: usize,
    pub clusters: Vec<Vec<T>>,
}

impl<T> From<Vec<Vec<T>>> for ClusterResponse<T> {
    fn from(clusters: Vec<Vec<T>>) -> Self {
        Self {
            cluster_count: clusters.len(),
            clusters,
        }
    }
}
