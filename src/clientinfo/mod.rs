//! Client observation module
//!
//! Extracts what the server can observe about a client from request
//! metadata: network address, locale, and preferred language. Everything is
//! derived fresh per request; nothing here holds state.

mod ip;
mod language;

pub use ip::{resolve_client_ip, Subnet, SubnetParseError};
pub use language::negotiate_language;

use crate::config::AppState;
use hyper::header::HeaderMap;
use serde::Serialize;
use std::net::IpAddr;

/// The three facts reported back to the client.
///
/// All fields are always populated; when a value cannot be determined the
/// configured default locale (or the TCP peer address) is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientObservation {
    pub ip_address: String,
    pub locale: String,
    pub preferred_language: String,
}

/// Build a `ClientObservation` from request metadata.
pub fn collect(headers: &HeaderMap, remote: IpAddr, state: &AppState) -> ClientObservation {
    let ip = resolve_client_ip(
        headers,
        remote,
        state.config.proxy.trust_forwarded,
        &state.trusted_subnets,
    );

    let accept_language = headers.get("accept-language").and_then(|v| v.to_str().ok());
    let (locale, preferred_language) =
        negotiate_language(accept_language, &state.config.detect.default_locale);

    ClientObservation {
        ip_address: ip.to_string(),
        locale,
        preferred_language,
    }
}
