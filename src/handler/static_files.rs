//! Static file serving module
//!
//! Resolves request paths under the static root, then builds the response
//! with conditional (ETag) and range support.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the static file for `ctx.path`
///
/// `/` falls back to the entry page when the root has no index file.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let resolved = resolve_path(
        &state.static_root,
        ctx.path,
        &state.config.storage.index_files,
    )
    .await;

    let file_path = match resolved {
        Some(path) => path,
        None if ctx.path == "/" => state.entry_file.clone(),
        None => return http::build_404_response(),
    };

    match fs::read(&file_path).await {
        Ok(content) => {
            logger::log_debug(&format!(
                "Serving {} ({} bytes)",
                file_path.display(),
                content.len()
            ));
            build_static_file_response(ctx, Bytes::from(content), mime::content_type_for(&file_path))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Map a request path to a file inside `root`
///
/// Dot segments are treated as missing. Directories resolve to the first
/// existing index file. The final path must canonicalise to somewhere
/// under the canonical root.
pub async fn resolve_path(root: &Path, request_path: &str, index_files: &[String]) -> Option<PathBuf> {
    let mut candidate = root.to_path_buf();
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('.') || segment.contains('\\') {
            return None;
        }
        candidate.push(segment);
    }

    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let metadata = fs::metadata(&candidate).await.ok()?;
    if metadata.is_dir() {
        candidate = find_index_file(&candidate, index_files).await?;
    } else if request_path.ends_with('/') {
        return None;
    }

    let canonical = fs::canonicalize(&candidate).await.ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let path = dir.join(index_file);
        if fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
            return Some(path);
        }
    }
    None
}

/// Build static file response with ETag, conditional and range handling
fn build_static_file_response(
    ctx: &RequestContext<'_>,
    content: Bytes,
    content_type: &str,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);

    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match http::resolve_range(ctx.range_header.as_deref(), content.len()) {
        RangeOutcome::Full => {
            http::response::build_file_response(content, content_type, &etag, ctx.is_head)
        }
        RangeOutcome::Partial(range) => http::response::build_partial_response(
            &content,
            range,
            content_type,
            &etag,
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => http::build_416_response(content.len()),
    }
}
