use super::form::{Submission, ValidationErrors};
use crate::blog::{Post, Slug, ADMIN_POSTS_PATH};
use crate::error::{invariant, AppError};
use crate::state::{SharedState, State};
use crate::views::{field_error, layout, BUTTON_CLASS, INPUT_CLASS};
use axum::extract::{Form, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use maud::{html, Markup};
use serde::Deserialize;

/// The edit form as posted. Both buttons on the page submit `_action`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ActionForm {
    #[serde(rename = "_action")]
    action: Option<String>,
    title: Option<String>,
    slug: Option<Slug>,
    markdown: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum PostAction {
    /// Posted as `_action=create` by the edit form's submit button.
    Update(Submission),
    Delete { slug: Slug },
}

impl TryFrom<ActionForm> for PostAction {
    type Error = AppError;

    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        match form.action.as_deref() {
            Some("create") => Ok(PostAction::Update(Submission {
                title: form.title,
                slug: form.slug,
                markdown: form.markdown,
            })),
            Some("delete") => match form.slug {
                Some(slug) if !slug.is_empty() => Ok(PostAction::Delete { slug }),
                _ => Err(AppError::MissingField("Slug")),
            },
            _ => Err(AppError::UnknownAction(form.action.clone())),
        }
    }
}

async fn load(state: &State, slug: Option<&str>) -> Result<Post, AppError> {
    let slug = invariant(slug.filter(|it| !it.is_empty()), || {
        "params.slug is required".to_owned()
    })?;
    let post = state.posts.get_post(slug).await?;

    invariant(post, || format!("Post not found: {slug}"))
}

pub(super) async fn get(
    axum::extract::State(state): SharedState,
    slug: Option<Path<Slug>>,
) -> Result<Markup, AppError> {
    let post = load(&state, slug.as_ref().map(|Path(slug)| slug.as_str())).await?;

    Ok(page(&post, None, None))
}

pub(super) async fn post(
    axum::extract::State(state): SharedState,
    slug: Option<Path<Slug>>,
    Form(form): Form<ActionForm>,
) -> Result<Response, AppError> {
    match PostAction::try_from(form)? {
        PostAction::Update(submission) => {
            let fields = match submission.validate() {
                Ok(it) => it,
                Err(errors) => {
                    tracing::debug!(?errors, "post update rejected");
                    let post = load(&state, slug.as_ref().map(|Path(slug)| slug.as_str())).await?;

                    return Ok((
                        StatusCode::UNPROCESSABLE_ENTITY,
                        page(&post, Some(&submission), Some(&errors)),
                    )
                        .into_response());
                }
            };

            let key = fields.slug.clone();
            state.posts.update_post(&key, fields).await?;
        }
        PostAction::Delete { slug } => {
            state.posts.delete_post(&slug).await?;
        }
    }

    Ok(Redirect::to(ADMIN_POSTS_PATH).into_response())
}

fn page(post: &Post, draft: Option<&Submission>, errors: Option<&ValidationErrors>) -> Markup {
    let title = draft.and_then(Submission::title).unwrap_or(&post.title);
    let markdown = draft.and_then(Submission::markdown).unwrap_or(&post.markdown);
    let errors = errors.cloned().unwrap_or_default();

    layout(
        &format!("Edit {}", post.title),
        html! {
            main {
                div.flex.justify-end {
                    form method="post" style="display: inline" {
                        input type="hidden" name="slug" value=(post.slug);
                        button type="submit" name="_action" value="delete" class=(BUTTON_CLASS) aria-label="delete" {
                            "❌"
                        }
                    }
                }
                form method="post" {
                    p {
                        label {
                            "Post Title: "
                            (field_error(errors.title.as_deref()))
                            input type="text" name="title" value=(title) class=(INPUT_CLASS);
                        }
                    }
                    p {
                        label {
                            "Post Slug: "
                            (field_error(errors.slug.as_deref()))
                            input type="text" name="slug" value=(post.slug) readonly class=(INPUT_CLASS);
                        }
                    }
                    p {
                        label for="markdown" {
                            "Markdown: "
                            (field_error(errors.markdown.as_deref()))
                        }
                        br;
                        textarea id="markdown" rows="20" name="markdown" class={ (INPUT_CLASS) " font-mono" } {
                            (markdown)
                        }
                    }
                    p.text-right {
                        button type="submit" name="_action" value="create" class=(BUTTON_CLASS) data-busy-label="Updating..." {
                            "Update Post"
                        }
                    }
                }
            }
        },
    )
}
