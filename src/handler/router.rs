//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the
//! path-to-format routing decision, and the single place where handler
//! errors are translated to HTTP responses.

use crate::clientinfo;
use crate::config::AppState;
use crate::handler::error::HandlerError;
use crate::handler::render;
use crate::http;
use crate::logger;
use crate::logger::RequestLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Output representation selected by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
    Plain,
}

/// Map a request path to an output format. Exact, case-sensitive match;
/// no prefix matching and no trailing-slash normalization.
pub fn route(path: &str) -> Option<Format> {
    match path {
        "/" => Some(Format::Html),
        "/json" => Some(Format::Json),
        "/plain" => Some(Format::Plain),
        _ => None,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    if let Some(response) = check_http_method(&method) {
        return Ok(response);
    }

    let observation = clientinfo::collect(req.headers(), remote.ip(), &state);

    let response = match process(&req, &path, &observation, is_head, &state) {
        Ok(response) => response,
        Err(err) => translate_error(&err),
    };

    if state.config.logging.access_log {
        let entry = RequestLogEntry::new(
            observation.ip_address.clone(),
            method.to_string(),
            path,
            response.status().as_u16(),
            response_body_bytes(&response),
            start.elapsed(),
        );
        logger::log_request_completed(&entry, &state.config.logging.format);
    }

    Ok(response)
}

/// Inner handler: boundary checks, then route and render.
///
/// Returns an error kind instead of building failure responses itself;
/// `translate_error` is the only error-to-HTTP translation point.
fn process<B>(
    req: &Request<B>,
    path: &str,
    observation: &clientinfo::ClientObservation,
    is_head: bool,
    state: &Arc<AppState>,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    check_body_size(req, state.config.server.max_body_size)?;
    respond(path, observation, is_head)
}

/// Route the path and render the observation in the selected format.
pub fn respond(
    path: &str,
    observation: &clientinfo::ClientObservation,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    match route(path) {
        Some(Format::Html) => Ok(render::html_response(observation, is_head)),
        Some(Format::Json) => render::json_response(observation, is_head),
        Some(Format::Plain) => Ok(render::plain_response(observation, is_head)),
        None => Err(HandlerError::NotFound),
    }
}

/// Translate a handler error into its HTTP response. Single translation
/// point for all failure kinds.
fn translate_error(err: &HandlerError) -> Response<Full<Bytes>> {
    match err {
        HandlerError::NotFound => http::build_404_response(),
        HandlerError::Request { status, message } => http::build_error_response(*status, message),
        HandlerError::Internal(detail) => {
            logger::log_error(detail);
            http::build_500_response()
        }
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    if *method == Method::GET || *method == Method::HEAD {
        return None;
    }

    if *method == Method::OPTIONS {
        return Some(http::build_options_response());
    }

    logger::log_warning(&format!("Method not allowed: {method}"));
    Some(http::build_405_response())
}

/// Reject requests declaring an oversized body via Content-Length.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Result<(), HandlerError> {
    let Some(content_length) = req.headers().get("content-length") else {
        return Ok(());
    };

    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => Err(HandlerError::Request {
            status: 413,
            message: "Payload Too Large".to_string(),
        }),
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Response body size as declared by its Content-Length header.
fn response_body_bytes(response: &Response<Full<Bytes>>) -> u64 {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
