use chrono::Utc;

use crate::config::Config;
use crate::layout::PageConfig;
use crate::render::RenderOptions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry for every PDF render. A4 with 20mm margins by default.
    pub page_config: PageConfig,
}

impl AppState {
    /// Options for one render call, stamped with the current time.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            page: self.page_config.clone(),
            brand_line: self.config.brand_line.clone(),
            generated_at: Utc::now(),
        }
    }
}
