//! HTTP request handlers and router.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Extension, Multipart, Query},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use renderer::{
    colormap::JET_STOPS, legend::LEGEND_HEIGHT, pipeline, DisplaySize, EncodedImage,
    RenderedFrame, TemperatureRange,
};
use serde::{Deserialize, Serialize};
use thermal_common::{SampleGrid, ThermalError, ThermalResult};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::metrics::route;
use crate::state::AppState;

/// Download name given to rendered frames.
const DOWNLOAD_NAME: &str = "converted_image.jpg";

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

const MAX_LEGEND_WIDTH: u32 = 4096;

/// Build the service router. `/debug/*` routes are only registered when
/// `debug_routes` is set.
pub fn build_router(state: Arc<AppState>, debug_routes: bool) -> Router {
    let mut router = Router::new()
        // Rendering
        .route("/upload", post(upload_handler))
        .route("/upload/raw", post(upload_raw_handler))
        .route("/thermal", post(thermal_handler))
        .route("/thermal/push", post(thermal_push_handler))
        .route("/convert", post(convert_handler))
        .route("/latest", get(latest_handler))
        // Health and metrics
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/metrics", get(api_metrics_handler));

    if debug_routes {
        router = router
            .route("/debug/legend", get(debug_legend_handler))
            .route("/debug/colormap", get(debug_colormap_handler));
    }

    router
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Errors
// ============================================================================

/// Error response: the status from `ThermalError::http_status_code` and the
/// message as plain text.
#[derive(Debug)]
pub struct ApiError(pub ThermalError);

impl From<ThermalError> for ApiError {
    fn from(err: ThermalError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.0.to_string()).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Record the outcome of a render in metrics and logs.
fn finish<T>(
    state: &AppState,
    route: &'static str,
    request_id: Uuid,
    started: Instant,
    result: ThermalResult<T>,
) -> ApiResult<T> {
    match result {
        Ok(value) => {
            let elapsed = started.elapsed();
            state.metrics.record_render(route, elapsed);
            info!(
                request_id = %request_id,
                route,
                elapsed_ms = elapsed.as_millis() as u64,
                "Frame rendered"
            );
            Ok(value)
        }
        Err(e) => {
            let client_error = e.is_client_error();
            state.metrics.record_error(route, client_error);
            if client_error {
                warn!(request_id = %request_id, route, error = %e, "Rejected request");
            } else {
                error!(request_id = %request_id, route, error = %e, "Render failed");
            }
            Err(ApiError(e))
        }
    }
}

/// Run CPU-bound pipeline work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> ThermalResult<T>
where
    F: FnOnce() -> ThermalResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ThermalError::Internal(format!("Render task failed: {}", e)))?
}

// ============================================================================
// Helpers
// ============================================================================

/// Pull the `file` field out of a multipart body.
async fn read_file_field(multipart: &mut Multipart) -> ThermalResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ThermalError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(ThermalError::Validation("No selected file".to_string()));
        }
        debug!(file_name = %file_name, "File part found in the request");

        return field
            .bytes()
            .await
            .map_err(|e| ThermalError::Validation(format!("Failed to read upload: {}", e)));
    }

    Err(ThermalError::Validation("No file part".to_string()))
}

/// Write a frame to the last-frame slot. A failed write is logged and does
/// not fail the request.
async fn persist(state: &AppState, request_id: Uuid, encoded: &EncodedImage) {
    if let Err(e) = state.frames.put(encoded.bytes().clone()).await {
        warn!(request_id = %request_id, error = %e, "Failed to save last frame");
    }
}

fn jpeg_response(encoded: EncodedImage, range: Option<TemperatureRange>) -> Response {
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, encoded.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
            ),
        ],
        encoded.into_bytes(),
    )
        .into_response();

    if let Some(range) = range {
        let headers = response.headers_mut();
        for (name, value) in [("x-thermal-min", range.min), ("x-thermal-max", range.max)] {
            if let Ok(value) = HeaderValue::from_str(&format!("{:.1}", value)) {
                headers.insert(name, value);
            }
        }
    }

    response
}

async fn render_rgb_upload(
    state: &Arc<AppState>,
    route: &'static str,
    data: Bytes,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();
    debug!(request_id = %request_id, size = data.len(), "Processing raw RGB upload");

    let result = run_blocking(move || pipeline::render_rgb(&data, DisplaySize::Small)).await;
    let encoded = finish(state, route, request_id, started, result)?;

    persist(state, request_id, &encoded).await;
    Ok(jpeg_response(encoded, None))
}

async fn render_thermal_body(
    state: &Arc<AppState>,
    route: &'static str,
    request_id: Uuid,
    body: Bytes,
) -> ApiResult<RenderedFrame> {
    let started = Instant::now();
    let render_state = state.clone();
    let result = run_blocking(move || {
        let grid = SampleGrid::from_json(&body)?;
        pipeline::render_thermal(&grid, DisplaySize::Large, &render_state.font)
    })
    .await;
    let frame = finish(state, route, request_id, started, result)?;

    persist(state, request_id, &frame.encoded).await;
    Ok(frame)
}

// ============================================================================
// Rendering handlers
// ============================================================================

/// `POST /upload`: multipart `file` with 2304 bytes of raw 32x24 RGB.
pub async fn upload_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    debug!("Received request to /upload endpoint");
    let data = match read_file_field(&mut multipart).await {
        Ok(data) => data,
        Err(e) => return finish(&state, route::UPLOAD, Uuid::new_v4(), Instant::now(), Err(e)),
    };
    render_rgb_upload(&state, route::UPLOAD, data).await
}

/// `POST /upload/raw`: the same payload as the request body.
pub async fn upload_raw_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Response> {
    render_rgb_upload(&state, route::UPLOAD, body).await
}

/// `POST /thermal`: JSON array of 768 temperatures.
pub async fn thermal_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    let frame = render_thermal_body(&state, route::THERMAL, request_id, body).await?;
    Ok(jpeg_response(frame.encoded, Some(frame.range)))
}

/// Acknowledgment returned by `/thermal/push`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PushAck {
    pub success: bool,
    pub frame_id: Uuid,
    pub bytes: usize,
    pub width: u32,
    pub height: u32,
    pub min: f32,
    pub max: f32,
    pub pushed: bool,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// `POST /thermal/push`: render, then PUT the JPEG to the webcam service.
///
/// The frame has already been rendered and saved by the time the push runs,
/// so a failed push is reported in the body with a 200 status.
pub async fn thermal_push_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<PushAck>> {
    let request_id = Uuid::new_v4();
    let frame = render_thermal_body(&state, route::PUSH, request_id, body).await?;

    let (pushed, message) = match &state.webcam {
        None => (false, "Webcam push not configured".to_string()),
        Some(client) => match client.push(frame.encoded.bytes().clone()).await {
            Ok(()) => {
                state.metrics.record_push(true);
                info!(request_id = %request_id, url = %client.url(), "Frame pushed to webcam service");
                (true, "Frame pushed".to_string())
            }
            Err(e) => {
                state.metrics.record_push(false);
                warn!(request_id = %request_id, error = %e, "Webcam push failed");
                (false, e.to_string())
            }
        },
    };

    Ok(Json(PushAck {
        success: true,
        frame_id: request_id,
        bytes: frame.encoded.len(),
        width: frame.width,
        height: frame.height,
        min: frame.range.min,
        max: frame.range.max,
        pushed,
        message,
        timestamp: chrono::Utc::now(),
    }))
}

/// `POST /convert`: multipart `file` in any supported format, re-encoded as
/// JPEG.
pub async fn convert_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let result = match read_file_field(&mut multipart).await {
        Ok(data) => run_blocking(move || pipeline::convert_image(&data)).await,
        Err(e) => Err(e),
    };
    let encoded = finish(&state, route::CONVERT, request_id, started, result)?;
    Ok(jpeg_response(encoded, None))
}

/// `GET /latest`: the most recently saved frame.
pub async fn latest_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let frame = state.frames.get().await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, renderer::encode::JPEG_MIME),
            (header::CACHE_CONTROL, "no-store"),
        ],
        frame,
    ))
}

// ============================================================================
// Health and metrics
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus text exposition.
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}

/// JSON view of the local counters.
pub async fn api_metrics_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

// ============================================================================
// Debug handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LegendParams {
    min: Option<f32>,
    max: Option<f32>,
    width: Option<u32>,
}

/// `GET /debug/legend?min=&max=&width=`: the legend strip alone.
pub async fn debug_legend_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<LegendParams>,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let min = params.min.unwrap_or(20.0);
    let max = params.max.unwrap_or(30.0);
    let width = params.width.unwrap_or_else(|| DisplaySize::Large.dimensions().0);

    let result = if !min.is_finite() || !max.is_finite() || max < min {
        Err(ThermalError::Validation(format!(
            "Invalid legend range: min={}, max={}",
            min, max
        )))
    } else if width == 0 || width > MAX_LEGEND_WIDTH {
        Err(ThermalError::Validation(format!(
            "Legend width must be between 1 and {}, got {}",
            MAX_LEGEND_WIDTH, width
        )))
    } else {
        let render_state = state.clone();
        let range = TemperatureRange::new(min, max);
        run_blocking(move || pipeline::render_legend_preview(range, width, &render_state.font))
            .await
    };

    let encoded = finish(&state, route::DEBUG, request_id, started, result)?;
    debug!(width, height = LEGEND_HEIGHT, "Rendered legend preview");
    Ok(jpeg_response(encoded, Some(TemperatureRange::new(min, max))))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ColormapStop {
    pub position: f32,
    pub color: [u8; 3],
}

/// `GET /debug/colormap`: the gradient stops.
pub async fn debug_colormap_handler() -> Json<Vec<ColormapStop>> {
    Json(
        JET_STOPS
            .iter()
            .map(|stop| ColormapStop {
                position: stop.position,
                color: stop.color.0,
            })
            .collect(),
    )
}
