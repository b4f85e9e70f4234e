//! Router construction.
//!
//! Builds the axum router with all routes and middleware. Every route is
//! registered under the base path.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let base = state.base_path().to_owned();
    let at = |suffix: &str| format!("{base}{suffix}");

    let mut router = Router::new()
        .route(&at("api/navigation"), get(handlers::navigation::get_navigation))
        .route(&at("api/routes"), get(handlers::routes::get_routes))
        .route(&at("api/pages/"), get(handlers::pages::get_root_page))
        .route(&at("api/pages/{*path}"), get(handlers::pages::get_page))
        .route(&at("api/refresh"), post(handlers::refresh::refresh))
        .route(&at("assets/{name}"), get(handlers::assets::get_asset))
        .route(&base, get(handlers::viewer::get_view))
        .route(&at("{*path}"), get(handlers::viewer::get_view));

    // `/prefix` without the trailing slash is the landing page too
    let bare = base.trim_end_matches('/');
    if !bare.is_empty() {
        router = router.route(bare, get(handlers::viewer::get_view));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;
    use wsadocs_site::{Site, SiteOptions};
    use wsadocs_source::{MANIFEST_KEY, MockSource};

    use super::*;

    const MANIFEST: &str = r#"[
        {"title": "Home", "path": ""},
        {"title": "Guides", "children": [
            {"title": "Intro", "path": "intro"},
            {"title": "Missing", "path": "missing"}
        ]}
    ]"#;

    fn source() -> MockSource {
        MockSource::new()
            .with_document(MANIFEST_KEY, MANIFEST)
            .with_document("docs/index.md", "# Home\n\nWelcome home.")
            .with_document("docs/intro.md", "# Intro\n\n## Steps\n\n:button[Go]{to=\"#steps\"}")
            .with_status("docs/missing.md", 404)
    }

    fn router_with(source: MockSource, base_path: &str) -> (Arc<MockSource>, Router) {
        let source = Arc::new(source);
        let site = Site::new(
            Arc::clone(&source) as Arc<dyn wsadocs_source::DocSource>,
            SiteOptions {
                base_path: base_path.to_owned(),
                ..SiteOptions::default()
            },
        );
        let state = Arc::new(AppState {
            site: Arc::new(site),
            site_title: "Docs".to_owned(),
            highlight_css: ".hl-keyword { color: red; }".to_owned(),
            version: "test".to_owned(),
        });
        (source, create_router(state))
    }

    fn router(base_path: &str) -> Router {
        router_with(source(), base_path).1
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_landing_page_under_base() {
        for uri in ["/WSADOCS/", "/WSADOCS"] {
            let response = get(router("/WSADOCS/"), uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let html = body_text(response).await;
            assert!(html.contains(r#"<a class="navbar-brand" href="/WSADOCS/">Docs</a>"#));
            assert!(html.contains("Welcome home."));
        }
    }

    #[tokio::test]
    async fn test_outside_base_is_not_served() {
        let response = get(router("/WSADOCS/"), "/intro").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_viewer_page() {
        let response = get(router("/"), "/intro").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("menu-link active"));
        assert!(html.contains(r##"data-scroll="#steps">Go</button>"##));
    }

    #[tokio::test]
    async fn test_missing_page_is_404_with_placeholder() {
        let response = get(router("/"), "/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("<p>Page not found</p>"));
        assert!(!html.contains("Not found (path"));
    }

    #[tokio::test]
    async fn test_unknown_location_gets_welcome() {
        let response = get(router("/"), "/nowhere/at/all").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<h1>Welcome to WSADOCS!</h1>"));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let response = get(router("/"), "/").await;
        let headers = response.headers();
        assert!(
            headers[header::CONTENT_SECURITY_POLICY]
                .to_str()
                .unwrap()
                .contains("default-src 'self'")
        );
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_navigation_api() {
        let response = get(router("/"), "/api/navigation?location=intro").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["expanded"], serde_json::json!(["1"]));
        assert_eq!(json["trail"]["steps"][1]["title"], "Intro");
        assert_eq!(json["items"][1]["kind"], "group");
        assert_eq!(json["items"][1]["children"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_navigation_api_toggle() {
        let response = get(router("/"), "/api/navigation?location=&open=1&at=").await;
        let json = body_json(response).await;
        assert_eq!(json["expanded"], serde_json::json!(["1"]));
        assert_eq!(json["items"][1]["expanded"], true);
    }

    #[tokio::test]
    async fn test_routes_api() {
        let json = body_json(get(router("/WSADOCS/"), "/WSADOCS/api/routes").await).await;
        assert_eq!(json["routes"].as_array().unwrap().len(), 3);
        assert_eq!(json["routes"][1]["href"], "/WSADOCS/intro");
        assert_eq!(json["fallback"], "Welcome to WSADOCS!");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_routes_api_manifest_failure() {
        let (_, router) = router_with(MockSource::new().with_status(MANIFEST_KEY, 500), "/");
        let json = body_json(get(router, "/api/routes").await).await;
        assert_eq!(json["routes"], serde_json::json!([]));
        assert!(json["error"].as_str().unwrap().contains("HTTP status 500"));
    }

    #[tokio::test]
    async fn test_pages_api() {
        let response = get(router("/"), "/api/pages/intro").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        let json = body_json(response).await;
        assert_eq!(json["title"], "Intro");
        assert_eq!(json["toc"][0]["id"], "steps");
        assert_eq!(json["found"], true);
    }

    #[tokio::test]
    async fn test_pages_api_landing_and_missing() {
        let json = body_json(get(router("/"), "/api/pages/").await).await;
        assert_eq!(json["title"], "Home");

        let response = get(router("/"), "/api/pages/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["found"], false);
    }

    #[tokio::test]
    async fn test_pages_api_not_modified() {
        let router = router("/");
        let response = get(router.clone(), "/api/pages/intro").await;
        let etag = response.headers()[header::ETAG].clone();

        let response = router
            .oneshot(
                Request::get("/api/pages/intro")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_refresh_reloads_manifest() {
        let (source, router) = router_with(source(), "/");
        let json = body_json(get(router.clone(), "/api/routes").await).await;
        assert_eq!(json["routes"].as_array().unwrap().len(), 3);

        source.set_document(MANIFEST_KEY, r#"[{"title": "Only", "path": "only"}]"#);
        let response = router
            .clone()
            .oneshot(Request::post("/api/refresh").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["routes"], 1);

        let json = body_json(get(router, "/api/routes").await).await;
        assert_eq!(json["routes"][0]["path"], "only");
    }

    #[tokio::test]
    async fn test_manifest_read_once_across_requests() {
        let (source, router) = router_with(source(), "/");
        get(router.clone(), "/api/routes").await;
        get(router.clone(), "/api/navigation").await;
        get(router, "/api/routes").await;
        assert_eq!(source.read_count(), 1);
    }

    #[tokio::test]
    async fn test_assets() {
        let response = get(router("/W/"), "/W/assets/highlight.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
        assert_eq!(body_text(response).await, ".hl-keyword { color: red; }");

        let response = get(router("/W/"), "/W/assets/viewer.js").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(router("/W/"), "/W/assets/nope.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Asset not found");
    }
}
