use crate::state::NestedRouter;
use axum::routing::get;

mod admin;
mod index;
mod view;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(index::get))
        .route("/:slug", get(view::get))
        .nest("/admin", admin::route())
}
