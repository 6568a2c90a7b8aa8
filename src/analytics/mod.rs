//! Social analytics over the upstream users/posts/comments endpoints
//!
//! Every call is credential-gated through the same [`GatedFetcher`] as the
//! number endpoints. Individual fetch failures degrade to empty data; only
//! credential failures are returned as errors.

pub mod ranking;
pub mod types;

pub use types::{Comment, Post, PostWithComments, UserPostCount};

use {
    crate::{error::AuthError, upstream::GatedFetcher},
    serde::de::DeserializeOwned,
    std::{sync::Arc, time::Duration},
    types::{CommentsPayload, PostsPayload, UsersPayload},
};

pub const DEFAULT_TOP_LIMIT: usize = 5;

pub struct AnalyticsClient {
    fetcher: Arc<GatedFetcher>,
    base_url: String,
    timeout: Duration,
}

impl AnalyticsClient {
    pub fn new(fetcher: Arc<GatedFetcher>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn get<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, AuthError> {
        let url = format!("{}/{}", self.base_url, path);
        let outcome = self
            .fetcher
            .fetch::<T, _>(|client| client.get(&url), self.timeout)
            .await?;
        Ok(outcome.or_empty(path))
    }

    pub async fn users(&self) -> Result<Vec<(String, String)>, AuthError> {
        let payload: UsersPayload = self.get("users").await?;
        Ok(payload.users.into_iter().collect())
    }

    pub async fn posts_of(&self, user_id: &str) -> Result<Vec<Post>, AuthError> {
        let payload: PostsPayload = self.get(&format!("users/{}/posts", user_id)).await?;
        Ok(payload.posts)
    }

    pub async fn comments_of(&self, post_id: u64) -> Result<Vec<Comment>, AuthError> {
        let payload: CommentsPayload = self.get(&format!("posts/{}/comments", post_id)).await?;
        Ok(payload.comments)
    }

    async fn all_posts(&self) -> Result<Vec<Post>, AuthError> {
        let mut posts = Vec::new();
        for (id, _) in self.users().await? {
            posts.extend(self.posts_of(&id).await?);
        }
        Ok(posts)
    }

    /// Users with the most posts
    pub async fn top_users(&self, limit: usize) -> Result<Vec<UserPostCount>, AuthError> {
        let mut counts = Vec::new();
        for (id, name) in self.users().await? {
            let post_count = self.posts_of(&id).await?.len();
            counts.push(UserPostCount { id, name, post_count });
        }
        Ok(ranking::rank_users(counts, limit))
    }

    /// Newest posts across all users
    pub async fn latest_posts(&self, limit: usize) -> Result<Vec<Post>, AuthError> {
        Ok(ranking::latest(self.all_posts().await?, limit))
    }

    /// Posts sharing the highest comment count
    pub async fn popular_posts(&self) -> Result<Vec<PostWithComments>, AuthError> {
        let mut with_counts = Vec::new();
        for post in self.all_posts().await? {
            let comment_count = self.comments_of(post.id).await?.len();
            with_counts.push(PostWithComments { post, comment_count });
        }
        Ok(ranking::most_commented(with_counts))
    }
}
