// Application state for HTTP handlers
use crate::application::visual_service::VisualService;

#[derive(Clone)]
pub struct AppState {
    pub visual_service: VisualService,
}
