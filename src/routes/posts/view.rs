use crate::blog::Slug;
use crate::error::AppError;
use crate::state::SharedState;
use crate::views::layout;
use axum::extract::{Path, State};
use maud::{html, Markup, PreEscaped};

// raw HTML in a post is dropped, comrak's default
fn render_markdown(markdown: &str) -> String {
    comrak::markdown_to_html(markdown, &comrak::Options::default())
}

pub(super) async fn get(
    State(state): SharedState,
    Path(slug): Path<Slug>,
) -> Result<Markup, AppError> {
    let Some(post) = state.posts.get_post(&slug).await? else {
        return Err(AppError::PostNotFound(slug));
    };

    let markdown = post.markdown.clone();
    let html = tokio::task::spawn_blocking(move || render_markdown(&markdown)).await?;

    Ok(layout(
        &post.title,
        html! {
            main class="mx-auto max-w-4xl" {
                h1 class="my-6 border-b-2 text-center text-3xl" { (post.title) }
                article { (PreEscaped(html)) }
            }
        },
    ))
}
