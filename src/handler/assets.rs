//! Asset bundle serving module
//!
//! Maps request paths to files under the site root and builds the cached
//! responses for them. Anything that matches no asset falls back to the
//! entry document; only real I/O faults become 500s.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::config::SiteConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::logger;

/// Faults while producing an asset response.
///
/// A missing asset is deliberately not represented here; misses take the
/// entry-document fallback instead of erroring.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serve a request path from the asset bundle, falling back to the entry
/// document when nothing matches.
pub async fn serve(ctx: &RequestContext<'_>, site: &SiteConfig) -> Response<Full<Bytes>> {
    match resolve_and_load(site, ctx.path).await {
        Ok(Some((content, content_type))) => {
            build_asset_response(&content, content_type, ctx, site.cache_max_age)
        }
        Ok(None) => serve_entry_document(ctx, site).await,
        Err(e) => {
            logger::log_error(&e.to_string());
            http::build_server_error_response()
        }
    }
}

/// Resolve a request path against the bundle and read the file.
/// `Ok(None)` is a miss (fallback); `Err` is a genuine read fault.
async fn resolve_and_load(
    site: &SiteConfig,
    request_path: &str,
) -> Result<Option<(Vec<u8>, &'static str)>, AssetError> {
    let Some(path) = resolve_asset_path(&site.root, request_path, &site.index_files) else {
        return Ok(None);
    };

    match fs::read(&path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
            Ok(Some((content, content_type)))
        }
        // Deleted between resolution and read: a miss, not a fault
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AssetError::Read { path, source }),
    }
}

/// Map a request path to a file inside the asset root.
///
/// Directory paths try the configured index files. Paths that resolve
/// outside the root are rejected; the caller sees them as plain misses.
fn resolve_asset_path(root: &str, request_path: &str, index_files: &[String]) -> Option<PathBuf> {
    let clean_path = request_path.trim_start_matches('/').replace("..", "");

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!("Asset root '{root}' not accessible: {e}"));
            return None;
        }
    };

    let mut file_path = Path::new(root).join(&clean_path);

    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in index_files {
            let candidate = file_path.join(index_file);
            if candidate.is_file() {
                file_path = candidate;
                break;
            }
        }
    }

    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path}"
        ));
        return None;
    }
    if !file_canonical.is_file() {
        return None;
    }

    Some(file_canonical)
}

/// The single-page fallback: any unmatched path gets the entry document
/// with HTTP 200, so page routes handled client-side never 404.
async fn serve_entry_document(
    ctx: &RequestContext<'_>,
    site: &SiteConfig,
) -> Response<Full<Bytes>> {
    let entry_path = Path::new(&site.root).join(&site.entry_document);

    match fs::read(&entry_path).await {
        Ok(content) => http::response::build_html_response(content, ctx.is_head),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            http::response::build_html_response(placeholder_page().into_bytes(), ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read entry document '{}': {e}",
                entry_path.display()
            ));
            http::build_server_error_response()
        }
    }
}

/// Build the response for a loaded asset: conditional requests first, then
/// ranges, then the full representation.
fn build_asset_response(
    data: &[u8],
    content_type: &'static str,
    ctx: &RequestContext<'_>,
    max_age: u32,
) -> Response<Full<Bytes>> {
    let etag = cache::etag_for(data);

    if cache::none_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, max_age);
    }

    let total = data.len();
    match http::parse_range_header(ctx.range_header.as_deref(), total) {
        RangeOutcome::Satisfiable(range) => {
            let start = range.start;
            let end = range.end_position(total);
            http::response::build_partial_response(
                Bytes::from(data[start..=end].to_vec()),
                content_type,
                &etag,
                max_age,
                start,
                end,
                total,
                ctx.is_head,
            )
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total),
        RangeOutcome::Ignored => http::response::build_cached_response(
            Bytes::from(data.to_owned()),
            content_type,
            &etag,
            max_age,
            ctx.is_head,
        ),
    }
}

/// Shown only when the bundle has no entry document at all.
fn placeholder_page() -> String {
    String::from(
        r"<!DOCTYPE html>
<html>
<head>
    <meta charset='utf-8'>
    <meta name='viewport' content='width=device-width, initial-scale=1'>
    <title>siteserve</title>
</head>
<body>
    <h1>siteserve</h1>
    <p>The server is running, but no entry document was found in the asset bundle.</p>
    <p>Place an <code>index.html</code> in the configured site root.</p>
</body>
</html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn bundle() -> (TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("index.html"), "<html>entry</html>").unwrap();
        std_fs::create_dir(dir.path().join("css")).unwrap();
        std_fs::write(dir.path().join("css/styles.css"), "body { margin: 0 }").unwrap();

        let site = SiteConfig {
            root: dir.path().to_str().unwrap().to_string(),
            entry_document: "index.html".to_string(),
            index_files: vec!["index.html".to_string()],
            cache_max_age: 86_400,
        };
        (dir, site)
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn nested_assets_resolve() {
        let (_dir, site) = bundle();
        let path = resolve_asset_path(&site.root, "/css/styles.css", &site.index_files);
        assert!(path.is_some());
    }

    #[test]
    fn directory_paths_use_index_files() {
        let (_dir, site) = bundle();
        let path = resolve_asset_path(&site.root, "/", &site.index_files).unwrap();
        assert!(path.ends_with("index.html"));
    }

    #[test]
    fn traversal_is_rejected() {
        let (_dir, site) = bundle();
        assert!(resolve_asset_path(&site.root, "/../../etc/passwd", &site.index_files).is_none());
        assert!(resolve_asset_path(&site.root, "/..%2f..%2fetc/passwd", &site.index_files).is_none());
    }

    #[test]
    fn missing_assets_are_a_miss() {
        let (_dir, site) = bundle();
        assert!(resolve_asset_path(&site.root, "/no-such-file.js", &site.index_files).is_none());
    }

    #[tokio::test]
    async fn asset_hit_carries_cache_headers() {
        let (_dir, site) = bundle();
        let resp = serve(&ctx("/css/styles.css"), &site).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert!(resp.headers().contains_key("ETag"));
        assert_eq!(
            resp.headers().get("Cache-Control").unwrap(),
            "public, max-age=86400"
        );
        assert_eq!(body_string(resp).await, "body { margin: 0 }");
    }

    #[tokio::test]
    async fn repeated_requests_return_identical_bytes_and_etag() {
        let (_dir, site) = bundle();
        let first = serve(&ctx("/css/styles.css"), &site).await;
        let second = serve(&ctx("/css/styles.css"), &site).await;
        assert_eq!(
            first.headers().get("ETag").unwrap(),
            second.headers().get("ETag").unwrap()
        );
        assert_eq!(body_string(first).await, body_string(second).await);
    }

    #[tokio::test]
    async fn matching_if_none_match_returns_304() {
        let (_dir, site) = bundle();
        let first = serve(&ctx("/css/styles.css"), &site).await;
        let etag = first.headers().get("ETag").unwrap().to_str().unwrap().to_string();

        let conditional = RequestContext {
            path: "/css/styles.css",
            is_head: false,
            if_none_match: Some(etag),
            range_header: None,
        };
        let resp = serve(&conditional, &site).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn range_request_returns_partial_content() {
        let (_dir, site) = bundle();
        let ranged = RequestContext {
            path: "/css/styles.css",
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=0-3".to_string()),
        };
        let resp = serve(&ranged, &site).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(body_string(resp).await, "body");
    }

    #[tokio::test]
    async fn unmatched_path_falls_back_to_entry_document() {
        let (_dir, site) = bundle();
        let resp = serve(&ctx("/nonexistent-page"), &site).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(body_string(resp).await, "<html>entry</html>");
    }

    #[tokio::test]
    async fn fallback_body_matches_the_entry_document_exactly() {
        let (_dir, site) = bundle();
        let root = serve(&ctx("/"), &site).await;
        let fallback = serve(&ctx("/some/client/route"), &site).await;
        assert_eq!(body_string(root).await, body_string(fallback).await);
    }

    #[tokio::test]
    async fn missing_entry_document_still_answers_200() {
        let dir = tempfile::tempdir().unwrap();
        let site = SiteConfig {
            root: dir.path().to_str().unwrap().to_string(),
            entry_document: "index.html".to_string(),
            index_files: vec!["index.html".to_string()],
            cache_max_age: 86_400,
        };
        let resp = serve(&ctx("/anything"), &site).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("no entry document"));
    }
}
