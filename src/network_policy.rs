// src/network_policy.rs
// The preview may only load from the project scheme or inline data/blob URLs.

use crate::responder::PREVIEW_SCHEME;

const INLINE_SCHEMES: &[&str] = &["data", "blob"];
const SHELL_HOST: &str = "tauri.localhost";

fn split_scheme(url: &str) -> Option<(String, &str)> {
    let (scheme, rest) = url.split_once(':')?;
    if scheme.is_empty() {
        return None;
    }
    Some((scheme.to_ascii_lowercase(), rest))
}

// Host of a hierarchical URL remainder (`//host:port/path`), lowercased.
fn host_of(rest: &str) -> Option<String> {
    let authority = rest.strip_prefix("//")?;
    let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
    let authority = &authority[..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host_port.split(':').next().unwrap_or_default();
    Some(host.to_ascii_lowercase())
}

fn is_http(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// Whether a request issued by the preview surface may proceed.
/// Webviews that cannot register custom schemes expose them as `http://<scheme>.localhost`.
pub fn is_request_allowed(url: &str) -> bool {
    let Some((scheme, rest)) = split_scheme(url) else {
        return false;
    };
    if scheme == PREVIEW_SCHEME || INLINE_SCHEMES.contains(&scheme.as_str()) {
        return true;
    }
    is_http(&scheme)
        && host_of(rest).is_some_and(|host| host == format!("{}.localhost", PREVIEW_SCHEME))
}

// Source list shared by every directive of the preview policy.
fn preview_sources() -> Vec<String> {
    let mut sources = vec![
        format!("{}:", PREVIEW_SCHEME),
        format!("http://{}.localhost", PREVIEW_SCHEME),
        format!("https://{}.localhost", PREVIEW_SCHEME),
    ];
    sources.extend(INLINE_SCHEMES.iter().map(|scheme| format!("{}:", scheme)));
    sources
}

/// `Content-Security-Policy` value for served project files. It names exactly the
/// origins `is_request_allowed` accepts, so fetches and subresources from a page
/// are confined the same way its navigations are.
pub fn preview_content_security_policy() -> String {
    let sources = preview_sources().join(" ");
    format!("default-src {sources} 'unsafe-inline'; connect-src {sources}; form-action {sources}")
}

/// Whether `url` belongs to the editor's own UI rather than to project content.
pub fn is_shell_url(url: &str) -> bool {
    let Some((scheme, rest)) = split_scheme(url) else {
        return false;
    };
    match scheme.as_str() {
        "tauri" => host_of(rest).as_deref() == Some("localhost"),
        s if is_http(s) => host_of(rest).as_deref() == Some(SHELL_HOST),
        _ => false,
    }
}
