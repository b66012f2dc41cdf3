// crates/edge/src/state.rs

use domain::setting::Settings;
use serve::render::Renderer;
use serve::store::ContentStore;
use std::sync::Arc;

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn ContentStore>,
    pub mirror: Option<Arc<dyn ContentStore>>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        store: Arc<dyn ContentStore>,
        mirror: Option<Arc<dyn ContentStore>>,
        renderer: Renderer,
    ) -> Self {
        AppState {
            settings: Arc::new(settings),
            store,
            mirror,
            renderer: Arc::new(renderer),
        }
    }

    pub fn mirror_ref(&self) -> Option<&dyn ContentStore> {
        self.mirror.as_deref()
    }
}
