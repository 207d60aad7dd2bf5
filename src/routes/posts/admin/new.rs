use super::form::{Submission, ValidationErrors};
use crate::blog::{is_url_safe_slug, ADMIN_POSTS_PATH};
use crate::error::AppError;
use crate::state::{SharedState, StoreError};
use crate::views::{field_error, layout, BUTTON_CLASS, INPUT_CLASS};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use maud::{html, Markup};

pub(super) async fn get() -> Markup {
    page(&Submission::default(), &ValidationErrors::default())
}

pub(super) async fn post(
    State(state): SharedState,
    Form(submission): Form<Submission>,
) -> Result<Response, AppError> {
    let mut errors = match submission.validate() {
        Ok(fields) if is_url_safe_slug(&fields.slug) => {
            match state.posts.create_post(fields).await {
                Ok(_) => return Ok(Redirect::to(ADMIN_POSTS_PATH).into_response()),
                Err(StoreError::Conflict(_)) => ValidationErrors {
                    slug: Some("Slug is already taken".to_owned()),
                    ..ValidationErrors::default()
                },
                Err(err) => return Err(err.into()),
            }
        }
        Ok(_) => ValidationErrors::default(),
        Err(errors) => errors,
    };

    if errors.slug.is_none() && !submission.slug.as_deref().map_or(true, is_url_safe_slug) {
        errors.slug = Some("Slug must be lowercase letters, digits and dashes".to_owned());
    }
    tracing::debug!(?errors, "new post rejected");

    Ok((StatusCode::UNPROCESSABLE_ENTITY, page(&submission, &errors)).into_response())
}

fn page(draft: &Submission, errors: &ValidationErrors) -> Markup {
    layout(
        "New Post",
        html! {
            main {
                form method="post" {
                    p {
                        label {
                            "Post Title: "
                            (field_error(errors.title.as_deref()))
                            input type="text" name="title" value=(draft.title().unwrap_or_default()) class=(INPUT_CLASS);
                        }
                    }
                    p {
                        label {
                            "Post Slug: "
                            (field_error(errors.slug.as_deref()))
                            input type="text" name="slug" value=(draft.slug.as_deref().unwrap_or_default()) class=(INPUT_CLASS);
                        }
                    }
                    p {
                        label for="markdown" {
                            "Markdown: "
                            (field_error(errors.markdown.as_deref()))
                        }
                        br;
                        textarea id="markdown" rows="20" name="markdown" class={ (INPUT_CLASS) " font-mono" } {
                            (draft.markdown().unwrap_or_default())
                        }
                    }
                    p.text-right {
                        button type="submit" class=(BUTTON_CLASS) data-busy-label="Creating..." {
                            "Create Post"
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::testing::{body_string, fixture, get, post_form, StoreCall};
    use axum::http::header::LOCATION;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn the_form_starts_empty() {
        let (_store, state) = fixture(&[]);

        let response = get(state, "/posts/admin/new").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;

        assert!(body.contains(r#"name="title" value="""#));
        assert!(body.contains(r#"data-busy-label="Creating...""#));
    }

    #[tokio::test]
    async fn a_complete_post_is_created() {
        let (store, state) = fixture(&[]);

        let response = post_form(
            state,
            "/posts/admin/new",
            "title=Hello&slug=hello-world&markdown=%23+Hi",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/posts/admin");
        assert_eq!(
            store.calls().await,
            [StoreCall::Create {
                slug: "hello-world".to_owned()
            }]
        );
    }

    #[tokio::test]
    async fn missing_fields_are_reported_and_the_draft_kept() {
        let (store, state) = fixture(&[]);

        let response = post_form(state, "/posts/admin/new", "title=Draft&slug=&markdown=").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("Slug is required"));
        assert!(body.contains("Markdown is required"));
        assert!(!body.contains("Title is required"));
        assert!(body.contains(r#"value="Draft""#));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn slugs_must_be_url_safe() {
        let (store, state) = fixture(&[]);

        let response = post_form(state, "/posts/admin/new", "title=T&slug=Not+Safe&markdown=M").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response)
            .await
            .contains("Slug must be lowercase letters, digits and dashes"));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn taken_slugs_are_reported_inline() {
        let (_store, state) = fixture(&[("taken", "Taken", "x")]);

        let response = post_form(state, "/posts/admin/new", "title=T&slug=taken&markdown=M").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response).await.contains("Slug is already taken"));
    }
}
