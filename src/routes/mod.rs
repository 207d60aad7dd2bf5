use crate::state::State;
use axum::response::Redirect;
use axum::routing::get;
use std::sync::Arc;

mod posts;

pub fn app(state: Arc<State>) -> axum::Router {
    axum::Router::new()
        .route("/", get(|| async { Redirect::to("/posts") }))
        .nest("/posts", posts::route())
        .with_state(state)
}
