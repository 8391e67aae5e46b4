//! Embedded web dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page campaign dashboard
//! - JSON API endpoints for rendering, selecting and resetting
//!
//! Launched via `campaign-dash serve` (default: `http://127.0.0.1:8501`).

mod api;
mod frontend;
pub mod session;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use session::DashboardSession;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address.
///
/// Blocks the current thread and handles requests sequentially, so the
/// session's selection has exactly one writer. A failing request gets a 500
/// and the server keeps running.
pub fn serve(addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let url = format!("http://{addr}");
    tracing::info!(%url, "dashboard running");
    println!("campaign-dash running at {url}");
    println!("Press Ctrl+C to stop.\n");

    if open && let Err(e) = open_browser(&url) {
        tracing::debug!(error = %e, "could not open browser");
    }

    let mut session = DashboardSession::new();

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let (resp, status) = match dispatch(&method, &url, body.as_deref(), &mut session) {
            Ok(resp) => {
                let status = resp.status_code().0;
                (resp, status)
            }
            Err(e) => {
                tracing::error!(%method, %url, error = format!("{e:#}"), "request failed");
                (error_response(&e), 500)
            }
        };

        if let Err(e) = request.respond(resp) {
            tracing::debug!(error = %e, "client went away before the response was sent");
        }

        tracing::info!(%method, %url, status, "request");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    method: &Method,
    url: &str,
    body: Option<&str>,
    session: &mut DashboardSession,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        (&Method::Get, "/api/page") => api::get_page(session),
        (&Method::Post, "/api/select") => api::post_select(session, body.unwrap_or("{}")),
        (&Method::Post, "/api/reset") => api::post_reset(session),

        (&Method::Get, "/api/config") => api::get_config(),
        (&Method::Get, "/api/health") => api::get_health(),

        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

fn error_response(err: &anyhow::Error) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": format!("{err:#}") }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(500))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .expect("static header is valid")
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8")
        .expect("static header is valid")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_routes_are_404() {
        let mut session = DashboardSession::new();
        let resp = dispatch(&Method::Get, "/nope", None, &mut session).unwrap();
        assert_eq!(resp.status_code().0, 404);
        let resp = dispatch(&Method::Delete, "/api/page", None, &mut session).unwrap();
        assert_eq!(resp.status_code().0, 404);
    }

    #[test]
    fn index_is_served_with_query_string() {
        let mut session = DashboardSession::new();
        let resp = dispatch(&Method::Get, "/?campaign=x", None, &mut session).unwrap();
        assert_eq!(resp.status_code().0, 200);
    }

    #[test]
    fn malformed_select_body_is_an_error() {
        let mut session = DashboardSession::new();
        let result = dispatch(&Method::Post, "/api/select", Some("not json"), &mut session);
        assert!(result.is_err());
        assert_eq!(session.context().selected_campaign, None);
    }
}
