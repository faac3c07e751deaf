//! Service configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use renderer::FontSource;
use tracing::Level;

/// Runtime configuration. Every flag can also be set through the listed
/// environment variable (a `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(name = "thermal-api")]
#[command(about = "Renders thermal sensor frames to JPEG with a temperature legend")]
pub struct ServiceConfig {
    /// Listen address
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5001")]
    pub listen: String,

    /// Log level (default: debug when DEBUG is set, otherwise info)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// TrueType font for legend labels (bitmap font if unset or unreadable)
    #[arg(long, env = "LEGEND_FONT_PATH")]
    pub font_path: Option<PathBuf>,

    /// Where the most recent frame is written
    #[arg(long, env = "FRAME_PATH", default_value = "last_frame.jpg")]
    pub frame_path: PathBuf,

    /// Webcam ingestion endpoint frames are pushed to
    #[arg(long, env = "WEBCAM_URL")]
    pub webcam_url: Option<String>,

    /// Webcam identity sent as the `fingerprint` header
    #[arg(long, env = "WEBCAM_FINGERPRINT")]
    pub webcam_fingerprint: Option<String>,

    /// Shared secret sent as the `token` header
    #[arg(long, env = "WEBCAM_TOKEN", hide_env_values = true)]
    pub webcam_token: Option<String>,

    /// Register /debug/* routes and default to debug logging
    #[arg(long = "debug-routes", env = "DEBUG", default_value_t = false)]
    pub debug_routes: bool,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

/// Credentials and endpoint for the webcam push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebcamConfig {
    pub url: String,
    pub fingerprint: String,
    pub token: String,
}

impl ServiceConfig {
    /// Parse and validate the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen))
    }

    /// Level for the tracing subscriber. An explicit `--log-level` wins;
    /// otherwise `DEBUG` selects debug logging.
    pub fn tracing_level(&self) -> Level {
        match self.log_level.as_deref().map(str::to_lowercase).as_deref() {
            Some("trace") => Level::TRACE,
            Some("debug") => Level::DEBUG,
            Some("warn") => Level::WARN,
            Some("error") => Level::ERROR,
            Some(_) => Level::INFO,
            None if self.debug_routes => Level::DEBUG,
            None => Level::INFO,
        }
    }

    pub fn font_source(&self) -> FontSource {
        FontSource::from_path(self.font_path.clone())
    }

    /// Webcam settings, if the push is configured. All three values must be
    /// given together.
    pub fn webcam(&self) -> Result<Option<WebcamConfig>> {
        match (
            &self.webcam_url,
            &self.webcam_fingerprint,
            &self.webcam_token,
        ) {
            (None, None, None) => Ok(None),
            (Some(url), Some(fingerprint), Some(token)) => Ok(Some(WebcamConfig {
                url: url.clone(),
                fingerprint: fingerprint.clone(),
                token: token.clone(),
            })),
            _ => bail!(
                "WEBCAM_URL, WEBCAM_FINGERPRINT and WEBCAM_TOKEN must be set together"
            ),
        }
    }

    /// Check everything that can be checked before binding.
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        self.webcam()?;
        if self.worker_threads == Some(0) {
            bail!("worker_threads must be at least 1");
        }
        Ok(())
    }
}
