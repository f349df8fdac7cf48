use crate::config::settings::AppConfig;
use crate::infrastructure::scratch::ScratchArea;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub scratch: ScratchArea,
}

impl AppState {
    pub fn new(config: AppConfig, scratch: ScratchArea) -> Self {
        Self { config, scratch }
    }
}
