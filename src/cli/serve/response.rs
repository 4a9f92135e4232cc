//! HTTP response handlers.

use crate::embed::serve::{LOADING_HTML, LoadingVars, NOT_FOUND_HTML, NotFoundVars};
use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Seconds the loading page waits before retrying.
const LOADING_RETRY_SECS: u32 = 1;

/// Respond with a static file, verbatim.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with an assembled HTML document.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, HTML);
    }
    send_body(request, status, HTML, body.into_bytes())
}

/// Respond with 404, using the site's own page when one was assembled.
pub fn respond_not_found(request: Request, location: &str, custom: Option<String>) -> Result<()> {
    let body = custom.unwrap_or_else(|| {
        NOT_FOUND_HTML.render(&NotFoundVars {
            title: "Not Found",
            path: location,
        })
    });
    respond_html(request, 404, body)
}

/// Respond with the loading page (503) while the config is not ready.
pub fn respond_loading(request: Request) -> Result<()> {
    let body = LOADING_HTML.render(&LoadingVars {
        title: "Loading",
        retry_secs: LOADING_RETRY_SECS,
    });
    let retry = LOADING_RETRY_SECS.to_string();
    let response = Response::from_string(body)
        .with_status_code(StatusCode(503))
        .with_header(make_header("Content-Type", HTML)?)
        .with_header(make_header("Retry-After", &retry)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with an assembly failure (500).
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let error_str = format!("{error:#}");
    let msg = crate::utils::html::escape(&error_str);
    let body = format!("<html><body><h1>Assembly Error</h1><pre>{msg}</pre></body></html>");
    send_body(request, 500, HTML, body.into_bytes())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
