//! Media routes: range-aware file serving, video listing, and resolution
//! checks.

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use surgistream_common::Error;

use super::error::AppError;
use super::request_id::RequestId;
use super::AppContext;
use crate::media::{self, MediaPayload, MediaRequest, PayloadKind, ResolutionReport, VideoEntry};

/// Create media routes.
pub fn media_routes() -> Router<AppContext> {
    Router::new()
        .route("/video", get(serve_video))
        .route("/media/*identifier", get(serve_media_path))
        .route("/videos", get(list_videos))
        .route("/videos/check", post(check_videos))
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VideoQuery {
    /// Filename or prefixed path, e.g. `demo.mp4` or `/files/demo.mp4`
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoListResponse {
    pub videos: Vec<VideoEntry>,
    pub count: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckRequest {
    pub identifiers: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Serve a media file by query parameter, honoring a single `Range`.
#[utoipa::path(
    get,
    path = "/api/video",
    params(VideoQuery),
    responses(
        (status = 200, description = "Full file"),
        (status = 206, description = "Requested byte range"),
        (status = 400, description = "Unsafe or empty identifier"),
        (status = 404, description = "No storage root holds the file"),
        (status = 416, description = "Range not satisfiable"),
    ),
    tag = "media"
)]
pub async fn serve_video(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    uri: Uri,
    query: Result<Query<VideoQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let identifier = match query {
        Ok(Query(query)) => query.file_path.unwrap_or_default(),
        Err(rejection) => {
            let err = Error::invalid_path(uri.query().unwrap_or_default(), rejection.body_text());
            return Err(AppError::new(err).with_request_id(request_id.0));
        }
    };
    serve(&ctx, identifier, &headers)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id.0))
}

/// Serve a media file addressed by the rest of the URL path.
#[utoipa::path(
    get,
    path = "/api/media/{identifier}",
    params(("identifier" = String, Path, description = "Filename or prefixed path")),
    responses(
        (status = 200, description = "Full file"),
        (status = 206, description = "Requested byte range"),
        (status = 400, description = "Unsafe or empty identifier"),
        (status = 404, description = "No storage root holds the file"),
        (status = 416, description = "Range not satisfiable"),
    ),
    tag = "media"
)]
pub async fn serve_media_path(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(identifier): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve(&ctx, identifier, &headers)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id.0))
}

/// List the video files present in each storage root.
#[utoipa::path(
    get,
    path = "/api/videos",
    responses((status = 200, description = "Videos by root", body = VideoListResponse)),
    tag = "videos"
)]
pub async fn list_videos(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<VideoListResponse>, AppError> {
    let resolver = ctx.resolver.clone();
    let videos = tokio::task::spawn_blocking(move || media::list_videos(resolver.roots()))
        .await
        .map_err(|e| {
            AppError::new(Error::Internal(format!("listing task failed: {e}")))
                .with_request_id(request_id.0)
        })?;

    let count = videos.len();
    Ok(Json(VideoListResponse { videos, count }))
}

/// Report which identifiers currently resolve to a servable file.
#[utoipa::path(
    post,
    path = "/api/videos/check",
    request_body = CheckRequest,
    responses((status = 200, description = "Per-identifier outcome", body = ResolutionReport)),
    tag = "videos"
)]
pub async fn check_videos(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<ResolutionReport>, AppError> {
    let resolver = ctx.resolver.clone();
    let report = tokio::task::spawn_blocking(move || {
        media::check_identifiers(&resolver, &request.identifiers)
    })
    .await
    .map_err(|e| {
        AppError::new(Error::Internal(format!("check task failed: {e}")))
            .with_request_id(request_id.0)
    })?;

    Ok(Json(report))
}

// ============================================================================
// Helpers
// ============================================================================

async fn serve(
    ctx: &AppContext,
    identifier: String,
    headers: &HeaderMap,
) -> surgistream_common::Result<Response> {
    let range = headers
        .get(header::RANGE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let request = MediaRequest::new(identifier, range);
    let resolver = ctx.resolver.clone();

    let payload = tokio::task::spawn_blocking(move || media::fetch(&resolver, &request))
        .await
        .map_err(|e| Error::Internal(format!("media read task failed: {e}")))??;

    Ok(payload_response(payload, ctx.config.server.cache_max_age_secs))
}

fn payload_response(payload: MediaPayload, cache_max_age_secs: u64) -> Response {
    let content_type = payload.file.content_type.to_string();
    let length = payload.body.len().to_string();
    let body = Body::from(payload.body);

    match payload.kind {
        PayloadKind::Full => {
            let headers: [(HeaderName, String); 4] = [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_LENGTH, length),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CACHE_CONTROL, format!("max-age={cache_max_age_secs}")),
            ];
            (StatusCode::OK, headers, body).into_response()
        }
        PayloadKind::Partial(range) => {
            let headers: [(HeaderName, String); 4] = [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_LENGTH, length),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CONTENT_RANGE, range.content_range()),
            ];
            (StatusCode::PARTIAL_CONTENT, headers, body).into_response()
        }
    }
}
