use once_cell::sync::Lazy;
use regex::Regex;

pub type Slug = String;

/// Where every successful admin write sends the browser.
pub const ADMIN_POSTS_PATH: &str = "/posts/admin";

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern should compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The writable part of a post, as handed to the store on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub slug: Slug,
    pub markdown: String,
}

/// Lowercase kebab-case, which is also what keeps a slug usable as a single
/// path component in the file store.
pub fn is_url_safe_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

pub fn admin_post_path(slug: &str) -> String {
    format!("{ADMIN_POSTS_PATH}/{}", urlencoding::encode(slug))
}

pub fn public_post_path(slug: &str) -> String {
    format!("/posts/{}", urlencoding::encode(slug))
}
