//! Request helpers and an in-memory store that remembers every write.

use crate::blog::{Post, PostFields, Slug};
use crate::state::{PostStore, State, StoreError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create {
        slug: Slug,
    },
    Update {
        slug: Slug,
        title: String,
        new_slug: Slug,
        markdown: String,
    },
    Delete {
        slug: Slug,
    },
}

#[derive(Debug, Default)]
pub struct RecordingStore {
    posts: Mutex<HashMap<Slug, Post>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl RecordingStore {
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }
}

fn post(slug: &str, title: &str, markdown: &str) -> Post {
    let now = chrono::Utc::now();
    Post {
        slug: slug.to_owned(),
        title: title.to_owned(),
        markdown: markdown.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl PostStore for RecordingStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.lock().await.values().cloned().collect::<Vec<_>>();
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    async fn get_post(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.lock().await.get(slug).cloned())
    }

    async fn create_post(&self, fields: PostFields) -> Result<Post, StoreError> {
        self.calls.lock().await.push(StoreCall::Create {
            slug: fields.slug.clone(),
        });

        let mut posts = self.posts.lock().await;
        if posts.contains_key(&fields.slug) {
            return Err(StoreError::Conflict(fields.slug));
        }
        let created = post(&fields.slug, &fields.title, &fields.markdown);
        posts.insert(fields.slug, created.clone());
        Ok(created)
    }

    async fn update_post(&self, slug: &str, fields: PostFields) -> Result<Post, StoreError> {
        self.calls.lock().await.push(StoreCall::Update {
            slug: slug.to_owned(),
            title: fields.title.clone(),
            new_slug: fields.slug.clone(),
            markdown: fields.markdown.clone(),
        });

        let mut posts = self.posts.lock().await;
        let Some(previous) = posts.remove(slug) else {
            return Err(StoreError::NotFound(slug.to_owned()));
        };
        let updated = Post {
            created_at: previous.created_at,
            ..post(&fields.slug, &fields.title, &fields.markdown)
        };
        posts.insert(fields.slug, updated.clone());
        Ok(updated)
    }

    async fn delete_post(&self, slug: &str) -> Result<(), StoreError> {
        self.calls.lock().await.push(StoreCall::Delete {
            slug: slug.to_owned(),
        });

        match self.posts.lock().await.remove(slug) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(slug.to_owned())),
        }
    }
}

/// A store seeded with `(slug, title, markdown)` posts, and app state on top.
pub fn fixture(posts: &[(&str, &str, &str)]) -> (Arc<RecordingStore>, Arc<State>) {
    let store = RecordingStore {
        posts: Mutex::new(
            posts
                .iter()
                .map(|(slug, title, markdown)| ((*slug).to_owned(), post(slug, title, markdown)))
                .collect(),
        ),
        calls: Mutex::default(),
    };
    let store = Arc::new(store);

    (store.clone(), Arc::new(State::new(store)))
}

async fn send(state: Arc<State>, request: Request<Body>) -> Response {
    crate::routes::app(state)
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn get(state: Arc<State>, uri: &str) -> Response {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("request should build");
    send(state, request).await
}

pub async fn post_form(state: Arc<State>, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request should build");
    send(state, request).await
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}
