use std::sync::Arc;
use ct_sync::Page;

pub struct AppState {
    pub page: Arc<Page>,
}
