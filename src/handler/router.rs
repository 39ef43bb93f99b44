//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: the navigation API gets its own
//! handler, everything else is the static site.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

const STATIC_METHODS: &str = "GET, HEAD, OPTIONS";

/// Request context encapsulating information needed for static file serving
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

impl<'a> RequestContext<'a> {
    fn from_request<B>(req: &'a Request<B>) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            path: req.uri().path(),
            is_head: *req.method() == Method::HEAD,
            if_none_match: header("if-none-match"),
            range_header: header("range"),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if is_navigation_path(req.uri().path()) {
        return api::handle_navigation(req, state).await;
    }

    match *req.method() {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => {
            return Ok(http::build_options_response(
                STATIC_METHODS,
                state.enable_cors(),
            ));
        }
        _ => {
            logger::log_warning(&format!(
                "Method not allowed: {} {}",
                req.method(),
                req.uri().path()
            ));
            return Ok(http::build_405_response(STATIC_METHODS));
        }
    }

    let ctx = RequestContext::from_request(&req);
    Ok(static_files::serve(&ctx, &state).await)
}

/// Non-strict match: a single trailing slash still reaches the API
fn is_navigation_path(path: &str) -> bool {
    path.strip_suffix('/').unwrap_or(path) == api::NAVIGATION_PATH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::fs;
    use std::path::Path;

    fn state_for(root: &Path) -> Arc<AppState> {
        Arc::new(AppState::new(&Config::for_root(root)))
    }

    fn get(uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_entry_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mainPage.html"), "<h1>nav</h1>").unwrap();
        let state = state_for(dir.path());

        let response = handle_request(get("/"), state).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "<h1>nav</h1>");
    }

    #[tokio::test]
    async fn test_root_prefers_index_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mainPage.html"), "main").unwrap();
        fs::write(dir.path().join("index.html"), "index").unwrap();
        let state = state_for(dir.path());

        let response = handle_request(get("/"), state).await.unwrap();
        assert_eq!(body_text(response).await, "index");
    }

    #[tokio::test]
    async fn test_root_without_any_page_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let response = handle_request(get("/"), state).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("style.css"), "body{}").unwrap();
        let state = state_for(dir.path());

        let response = handle_request(get("/style.css"), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/css; charset=utf-8");
        assert!(response.headers().contains_key("etag"));

        let missing = handle_request(get("/nope.js"), state).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_if_none_match_gives_304() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let state = state_for(dir.path());

        let first = handle_request(get("/app.js"), Arc::clone(&state))
            .await
            .unwrap();
        let etag = first.headers()["etag"].clone();

        let mut conditional = get("/app.js");
        conditional.headers_mut().insert("if-none-match", etag);
        let second = handle_request(conditional, state).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_range_request() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.txt"), "0123456789").unwrap();
        let state = state_for(dir.path());

        let mut req = get("/data.txt");
        req.headers_mut()
            .insert("range", "bytes=3-5".parse().unwrap());
        let response = handle_request(req, Arc::clone(&state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(body_text(response).await, "345");

        let mut req = get("/data.txt");
        req.headers_mut()
            .insert("range", "bytes=50-".parse().unwrap());
        let response = handle_request(req, state).await.unwrap();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    }

    #[tokio::test]
    async fn test_head_request_has_no_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mainPage.html"), "<h1>nav</h1>").unwrap();
        let state = state_for(dir.path());

        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = handle_request(req, state).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-length"], "12");
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_non_get_on_static_path() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let post = Request::builder()
            .method(Method::POST)
            .uri("/index.html")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = handle_request(post, Arc::clone(&state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], STATIC_METHODS);

        let options = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = handle_request(options, state).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_api_path_is_routed_to_api() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/navigation-data.json"),
            r#"[{"title":"Tools","links":[]}]"#,
        )
        .unwrap();
        let state = state_for(dir.path());

        for uri in ["/api/navigation", "/api/navigation/"] {
            let response = handle_request(get(uri), Arc::clone(&state)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()["content-type"],
                "application/json; charset=utf-8"
            );
        }
    }

    #[test]
    fn test_navigation_path_matching() {
        assert!(is_navigation_path("/api/navigation"));
        assert!(is_navigation_path("/api/navigation/"));
        assert!(!is_navigation_path("/api/navigation/extra"));
        assert!(!is_navigation_path("/api"));
    }
}
