//! Application state and shared resources.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use renderer::LegendFont;
use tracing::info;

use crate::config::ServiceConfig;
use crate::frame_store::{FileFrameStore, FrameStore};
use crate::metrics::MetricsCollector;
use crate::upstream::WebcamClient;

/// Shared application state.
pub struct AppState {
    /// Legend font, resolved once at startup
    pub font: LegendFont,
    /// Slot holding the most recent frame
    pub frames: Arc<dyn FrameStore>,
    /// Webcam push target, if configured
    pub webcam: Option<WebcamClient>,
    pub metrics: Arc<MetricsCollector>,
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: &ServiceConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let font = LegendFont::resolve(&config.font_source());
        info!(font = ?font, "Resolved legend font");

        let frames = Arc::new(FileFrameStore::new(config.frame_path.clone()));
        info!(path = %config.frame_path.display(), "Using file frame store");

        let webcam = config.webcam()?.map(WebcamClient::new);
        match &webcam {
            Some(client) => info!(url = %client.url(), "Webcam push enabled"),
            None => info!("Webcam push not configured"),
        }

        Ok(Self {
            font,
            frames,
            webcam,
            metrics: Arc::new(MetricsCollector::new()),
            prometheus,
        })
    }

    /// State from explicit parts, without Prometheus.
    pub fn from_parts(
        font: LegendFont,
        frames: Arc<dyn FrameStore>,
        webcam: Option<WebcamClient>,
    ) -> Self {
        Self {
            font,
            frames,
            webcam,
            metrics: Arc::new(MetricsCollector::new()),
            prometheus: None,
        }
    }
}
