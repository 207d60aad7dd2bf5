use crate::blog::{Post, PostFields, Slug};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    NotFound(Slug),
    #[error("slug is already taken: {0}")]
    Conflict(Slug),
    #[error("slug is not url-safe: {0:?}")]
    InvalidSlug(Slug),
    #[error("post store i/o failed at {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("post metadata at {path:?} is malformed: {source}")]
    Metadata {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence behind every page. Slug uniqueness is the store's job; the
/// pages only read posts and ask for updates and deletes.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Most recently updated first.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn get_post(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    async fn create_post(&self, fields: PostFields) -> Result<Post, StoreError>;

    /// Replaces title, slug and markdown of the post currently stored under
    /// `slug`. A different `fields.slug` moves the post.
    async fn update_post(&self, slug: &str, fields: PostFields) -> Result<Post, StoreError>;

    async fn delete_post(&self, slug: &str) -> Result<(), StoreError>;
}
