use crate::blog::public_post_path;
use crate::error::AppError;
use crate::state::SharedState;
use crate::views::layout;
use axum::extract::State;
use maud::{html, Markup};

pub(super) async fn get(State(state): SharedState) -> Result<Markup, AppError> {
    let posts = state.posts.list_posts().await?;

    Ok(layout(
        "Posts",
        html! {
            main {
                h1 { "Posts" }
                a class="text-sm text-red-600 underline" href=(crate::blog::ADMIN_POSTS_PATH) { "Admin" }
                ul {
                    @for post in &posts {
                        li {
                            a class="text-blue-600 underline" href=(public_post_path(&post.slug)) { (post.title) }
                        }
                    }
                }
            }
        },
    ))
}
