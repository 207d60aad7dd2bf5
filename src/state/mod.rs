use std::sync::Arc;

pub mod files;
pub mod store;

pub use store::{PostStore, StoreError};

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

pub struct State {
    pub posts: Arc<dyn PostStore>,
}

impl State {
    pub fn new(posts: Arc<dyn PostStore>) -> State {
        State { posts }
    }
}
