use crate::blog::Slug;
use crate::state::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Everything a page can fail with. Validation problems are not errors: the
/// pages hand those back to the form instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A condition the page relies on does not hold for this request.
    #[error("{0}")]
    Invariant(String),
    #[error("Post not found: {0}")]
    PostNotFound(Slug),
    #[error("Unknown form action: {0:?}")]
    UnknownAction(Option<String>),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("rendering task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Unwraps `value`, or fails the request with `message`.
pub fn invariant<T>(value: Option<T>, message: impl FnOnce() -> String) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Invariant(message()))
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Invariant(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PostNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnknownAction(_) | AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::InvalidSlug(_) => StatusCode::BAD_REQUEST,
                StoreError::Io { .. } | StoreError::Metadata { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        (status, crate::views::error_page(status, &self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_passes_values_through() {
        assert_eq!(invariant(Some(3), || "unused".to_owned()).unwrap(), 3);
    }

    #[test]
    fn broken_invariants_are_server_errors() {
        let err = invariant(None::<()>, || "params.slug is required".to_owned()).unwrap_err();

        assert_eq!(err.to_string(), "params.slug is required");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_keep_their_meaning() {
        let not_found = AppError::from(StoreError::NotFound("gone".to_owned()));
        let conflict = AppError::from(StoreError::Conflict("taken".to_owned()));

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn form_mistakes_are_client_errors() {
        assert_eq!(
            AppError::UnknownAction(Some("publish".to_owned())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingField("Slug").to_string(),
            "Slug is required"
        );
    }
}
