use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header::HOST, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Host header allow-list. Entries are exact host names, `*.suffix`
/// wildcards, or a lone `*` that disables the check.
#[derive(Clone, Debug)]
pub struct TrustedHosts {
    patterns: Arc<Vec<String>>,
    allow_any: bool,
}

impl TrustedHosts {
    pub fn new(hosts: &[String]) -> Self {
        Self {
            allow_any: hosts.iter().any(|h| h == "*"),
            patterns: Arc::new(hosts.iter().map(|h| h.to_ascii_lowercase()).collect()),
        }
    }

    pub fn allows_any(&self) -> bool {
        self.allow_any
    }

    pub fn allows(&self, host: &str) -> bool {
        if self.allow_any {
            return true;
        }
        let host = strip_port(host).to_ascii_lowercase();
        self.patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) if suffix.starts_with('.') => host.ends_with(suffix),
            _ => *pattern == host,
        })
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

pub async fn trusted_host_middleware(
    State(hosts): State<TrustedHosts>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if hosts.allows_any() {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().host())
        .map(str::to_owned);

    match host {
        Some(host) if hosts.allows(&host) => next.run(req).await,
        other => {
            tracing::warn!(host = ?other, "Rejected request with untrusted host");
            Error::BadRequest("Invalid host header".to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(list: &[&str]) -> TrustedHosts {
        TrustedHosts::new(&list.iter().map(|h| h.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn star_allows_everything() {
        assert!(hosts(&["*"]).allows("anything.test:1234"));
    }

    #[test]
    fn exact_match_ignores_port_and_case() {
        let trusted = hosts(&["api.example.com"]);
        assert!(trusted.allows("API.example.com:8000"));
        assert!(!trusted.allows("evil.com"));
    }

    #[test]
    fn wildcard_matches_subdomains_only() {
        let trusted = hosts(&["*.example.com"]);
        assert!(trusted.allows("api.example.com"));
        assert!(!trusted.allows("example.com"));
        assert!(!trusted.allows("example.com.evil.net"));
    }

    #[test]
    fn ipv6_literal_keeps_brackets() {
        let trusted = hosts(&["[::1]"]);
        assert!(trusted.allows("[::1]:8000"));
    }
}
