use crate::blog::{admin_post_path, Post};
use crate::error::AppError;
use crate::state::SharedState;
use crate::views::layout;
use axum::extract::State;
use maud::{html, Markup};

pub(super) async fn get(State(state): SharedState) -> Result<Markup, AppError> {
    let posts = state.posts.list_posts().await?;

    Ok(page(&posts))
}

fn page(posts: &[Post]) -> Markup {
    layout(
        "Admin",
        html! {
            main {
                h1 { "Blog Admin" }
                nav {
                    ul {
                        @for post in posts {
                            li {
                                a class="text-blue-600 underline" href=(admin_post_path(&post.slug)) { (post.title) }
                                " "
                                small { "updated " (post.updated_at.format("%Y-%m-%d %H:%M UTC").to_string()) }
                            }
                        }
                    }
                    @if posts.is_empty() {
                        p { "No posts yet." }
                    }
                }
                p {
                    a class="text-blue-600 underline" href="/posts/admin/new" { "Create a New Post" }
                }
            }
        },
    )
}
