use crate::blog::{is_url_safe_slug, Post, PostFields, Slug};
use crate::state::{PostStore, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const META_FILE: &str = "meta.json";
const TEXT_FILE: &str = "text.md";

/// Posts on disk, one folder per slug:
///
/// ```text
/// <root>/post/<slug>/meta.json
/// <root>/post/<slug>/text.md
/// ```
///
/// `meta.json` is written last, so a folder without one is an unfinished
/// write and is skipped by every read.
#[derive(Debug, Clone)]
pub struct FileStore {
    posts_dir: PathBuf,
}

// everything but the markdown, which lives next to it in text.md
#[derive(Debug, Serialize, Deserialize)]
struct PostMeta {
    slug: Slug,
    title: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

async fn read_post(post_dir: PathBuf) -> Result<Option<Post>, StoreError> {
    let meta_path = post_dir.join(META_FILE);
    let meta = match tokio::fs::read(&meta_path).await {
        Ok(it) => it,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(&meta_path)(err)),
    };
    let meta = serde_json::from_slice::<PostMeta>(&meta).map_err(|source| {
        StoreError::Metadata {
            path: meta_path.clone(),
            source,
        }
    })?;

    // lookups go by folder name, so a post is only reachable under its own slug
    if post_dir.file_name().and_then(|it| it.to_str()) != Some(meta.slug.as_str()) {
        tracing::warn!(slug = %meta.slug, ?post_dir, "post folder does not match its slug, skipping it");
        return Ok(None);
    }

    let text_path = post_dir.join(TEXT_FILE);
    let markdown = match tokio::fs::read_to_string(&text_path).await {
        Ok(it) => it,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(slug = %meta.slug, "post has metadata but no text, skipping it");
            return Ok(None);
        }
        Err(err) => return Err(io_error(&text_path)(err)),
    };

    Ok(Some(Post {
        slug: meta.slug,
        title: meta.title,
        markdown,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
    }))
}

async fn write_post(post_dir: &Path, post: &Post) -> Result<(), StoreError> {
    let text_path = post_dir.join(TEXT_FILE);
    tokio::fs::write(&text_path, &post.markdown)
        .await
        .map_err(io_error(&text_path))?;

    let meta = PostMeta {
        slug: post.slug.clone(),
        title: post.title.clone(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    };
    let meta_path = post_dir.join(META_FILE);
    let meta = serde_json::to_vec(&meta).map_err(|source| StoreError::Metadata {
        path: meta_path.clone(),
        source,
    })?;
    tokio::fs::write(&meta_path, meta)
        .await
        .map_err(io_error(&meta_path))
}

impl FileStore {
    /// Opens the store rooted at `root`, creating the post folder if needed.
    pub async fn open(root: impl AsRef<Path>) -> Result<FileStore, StoreError> {
        let posts_dir = root.as_ref().join("post");
        tokio::fs::create_dir_all(&posts_dir)
            .await
            .map_err(io_error(&posts_dir))?;

        Ok(FileStore { posts_dir })
    }

    fn post_dir(&self, slug: &str) -> Option<PathBuf> {
        is_url_safe_slug(slug).then(|| self.posts_dir.join(slug))
    }

    async fn existing_post_dir(&self, slug: &str) -> Result<PathBuf, StoreError> {
        let Some(post_dir) = self.post_dir(slug) else {
            return Err(StoreError::NotFound(slug.to_owned()));
        };
        match tokio::fs::try_exists(post_dir.join(META_FILE)).await {
            Ok(true) => Ok(post_dir),
            Ok(false) => Err(StoreError::NotFound(slug.to_owned())),
            Err(err) => Err(io_error(&post_dir)(err)),
        }
    }
}

#[async_trait]
impl PostStore for FileStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts_dir = tokio::fs::read_dir(&self.posts_dir)
            .await
            .map_err(io_error(&self.posts_dir))?;
        let mut read_set = tokio::task::JoinSet::new();

        while let Some(entry) = posts_dir
            .next_entry()
            .await
            .map_err(io_error(&self.posts_dir))?
        {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(io_error(&path))?;
            if !file_type.is_dir() {
                tracing::debug!(?path, "ignoring non-folder in post store");
                continue;
            }
            read_set.spawn(read_post(path));
        }

        let mut posts = Vec::new();
        while let Some(read) = read_set.join_next().await {
            let read = match read {
                Ok(it) => it,
                Err(err) => {
                    tracing::error!(%err, "post read task failed");
                    continue;
                }
            };
            if let Some(post) = read? {
                posts.push(post);
            }
        }

        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    async fn get_post(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        match self.post_dir(slug) {
            Some(post_dir) => read_post(post_dir).await,
            None => Ok(None),
        }
    }

    async fn create_post(&self, fields: PostFields) -> Result<Post, StoreError> {
        let Some(post_dir) = self.post_dir(&fields.slug) else {
            return Err(StoreError::InvalidSlug(fields.slug));
        };

        match tokio::fs::create_dir(&post_dir).await {
            Ok(()) => (),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Conflict(fields.slug));
            }
            Err(err) => return Err(io_error(&post_dir)(err)),
        }

        let now = chrono::Utc::now();
        let post = Post {
            slug: fields.slug,
            title: fields.title,
            markdown: fields.markdown,
            created_at: now,
            updated_at: now,
        };
        write_post(&post_dir, &post).await?;

        tracing::info!(slug = %post.slug, "created post");
        Ok(post)
    }

    async fn update_post(&self, slug: &str, fields: PostFields) -> Result<Post, StoreError> {
        let post_dir = self.existing_post_dir(slug).await?;
        let Some(previous) = read_post(post_dir.clone()).await? else {
            return Err(StoreError::NotFound(slug.to_owned()));
        };

        let post = Post {
            slug: fields.slug,
            title: fields.title,
            markdown: fields.markdown,
            created_at: previous.created_at,
            updated_at: chrono::Utc::now(),
        };

        if post.slug == slug {
            write_post(&post_dir, &post).await?;
        } else {
            let Some(new_dir) = self.post_dir(&post.slug) else {
                return Err(StoreError::InvalidSlug(post.slug));
            };
            // same atomic claim as create_post
            match tokio::fs::create_dir(&new_dir).await {
                Ok(()) => (),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    return Err(StoreError::Conflict(post.slug));
                }
                Err(err) => return Err(io_error(&new_dir)(err)),
            }
            write_post(&new_dir, &post).await?;
            tokio::fs::remove_dir_all(&post_dir)
                .await
                .map_err(io_error(&post_dir))?;
            tracing::info!(from = %slug, to = %post.slug, "moved post");
        }

        tracing::info!(slug = %post.slug, "updated post");
        Ok(post)
    }

    async fn delete_post(&self, slug: &str) -> Result<(), StoreError> {
        let post_dir = self.existing_post_dir(slug).await?;
        tokio::fs::remove_dir_all(&post_dir)
            .await
            .map_err(io_error(&post_dir))?;

        tracing::info!(%slug, "deleted post");
        Ok(())
    }
}
