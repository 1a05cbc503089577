use std::sync::Arc;

use attendtrack_collab::{BoxedStorage, Tracker};
use axum::extract::FromRef;

pub type ServerTracker = Tracker<BoxedStorage>;

#[derive(Clone, FromRef)]
pub struct ServerContext {
    pub tracker: Arc<ServerTracker>,
}

impl ServerContext {
    pub fn new(tracker: ServerTracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
        }
    }
}
