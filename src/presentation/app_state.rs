// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::reading_service::ReadingService;

#[derive(Clone)]
pub struct AppState {
    pub reading_service: ReadingService,
    pub dashboard_service: DashboardService,
}
