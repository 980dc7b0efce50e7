// src/responder.rs
// Serves project files to the preview webview under the `appfs://` scheme.

use crate::network_policy::preview_content_security_policy;
use crate::path_guard;
use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_SECURITY_POLICY, CONTENT_TYPE};
use http::{Method, Response, StatusCode};
use std::fs;
use std::path::Path;

pub const PREVIEW_SCHEME: &str = "appfs";
pub const DEFAULT_DOCUMENT: &str = "index.html";
pub const FALLBACK_MIME: &str = "application/octet-stream";

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "webmanifest" => "application/manifest+json",
        _ => FALLBACK_MIME,
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    path.extension()
        .map(|ext| mime_for_extension(&ext.to_string_lossy()))
        .unwrap_or(FALLBACK_MIME)
}

/// Answers one preview request. `root` is the project open at call time;
/// `uri_path` is the still percent-encoded path component of the request URI.
///
/// Error responses never carry details of the underlying failure.
pub fn respond(root: Option<&Path>, method: &Method, uri_path: &str) -> Response<Vec<u8>> {
    let Some(root) = root else {
        return plain(StatusCode::BAD_REQUEST, "No project loaded");
    };
    if *method != Method::GET {
        return plain(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let relative = match urlencoding::decode(uri_path.trim_start_matches('/')) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => return not_found(),
    };
    let relative = if relative.is_empty() {
        DEFAULT_DOCUMENT.to_string()
    } else {
        relative
    };

    let target = match path_guard::resolve(root, &relative) {
        Ok(target) => target,
        Err(e) => {
            log::debug!("[RESPONDER] {} rejected: {}", relative, e);
            return not_found();
        }
    };

    match fs::read(&target) {
        Ok(data) => {
            let mut response = Response::new(data);
            let headers = response.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime_for_path(&target)));
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
            match HeaderValue::from_str(&preview_content_security_policy()) {
                Ok(csp) => {
                    headers.insert(CONTENT_SECURITY_POLICY, csp);
                }
                Err(e) => log::error!("[RESPONDER] Invalid content security policy: {}", e),
            }
            response
        }
        Err(e) => {
            log::debug!("[RESPONDER] {} unreadable: {}", target.display(), e);
            not_found()
        }
    }
}

fn not_found() -> Response<Vec<u8>> {
    plain(StatusCode::NOT_FOUND, "Not found")
}

fn plain(status: StatusCode, message: &'static str) -> Response<Vec<u8>> {
    let mut response = Response::new(message.as_bytes().to_vec());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
