use crate::{aggregator::WarningService, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub service: WarningService,
}
