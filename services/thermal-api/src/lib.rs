//! Thermal frame rendering service.
//!
//! Exposes the rendering pipeline over HTTP, keeps the most recent frame in a
//! single-slot store and optionally forwards frames to a webcam ingestion
//! service.

pub mod config;
pub mod frame_store;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod upstream;

pub use config::ServiceConfig;
pub use handlers::build_router;
pub use state::AppState;
