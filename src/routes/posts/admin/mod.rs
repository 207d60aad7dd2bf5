use crate::state::NestedRouter;
use axum::routing::get;

mod edit;
mod form;
mod index;
mod new;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(index::get))
        .route("/new", get(new::get).post(new::post))
        .route("/:slug", get(edit::get).post(edit::post))
}
