//! OpenAPI documentation and Swagger UI integration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppContext;

/// OpenAPI documentation for surgistream.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Surgistream API",
        version = "0.1.0",
        description = "Range-aware media server for surgical training video playback",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Default server")
    ),
    paths(
        super::routes_media::serve_video,
        super::routes_media::serve_media_path,
        super::routes_media::list_videos,
        super::routes_media::check_videos,
    ),
    components(
        schemas(
            super::routes_media::VideoListResponse,
            super::routes_media::CheckRequest,
            crate::media::VideoEntry,
            crate::media::ResolutionReport,
            crate::media::ResolutionOutcome,
        )
    ),
    tags(
        (name = "media", description = "Range-aware file serving"),
        (name = "videos", description = "Storage root inspection"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/api-docs`, document at `/api-docs/openapi.json`.
pub fn openapi_routes() -> Router<AppContext> {
    Router::new().merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_media_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/video"));
        assert!(doc.paths.paths.contains_key("/api/media/{identifier}"));
        assert!(doc.paths.paths.contains_key("/api/videos/check"));
    }
}
