//! Upstream failure classification and credential scrubbing.

use std::error::Error;

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};

use crate::config::ApiKey;

const REDACTED: &[u8] = b"[REDACTED]";

/// Ways a single upstream exchange can fail.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Provider answered with a non-2xx status. Relayed as-is.
    #[error("upstream returned {status}")]
    Status {
        status: StatusCode,
        body: Bytes,
        content_type: Option<HeaderValue>,
    },

    #[error("upstream request timed out: {0}")]
    Timeout(String),

    #[error("could not connect to upstream: {0}")]
    Connect(String),

    #[error("upstream response is not valid JSON: {0}")]
    Decode(String),

    #[error("upstream request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// Classify a transport error. The URL carries the credential in its
    /// query string, so it is stripped before the message is rendered.
    pub fn from_transport(err: reqwest::Error, key: Option<&ApiKey>) -> Self {
        let err = err.without_url();
        let message = redact_str(&describe(&err), key);
        if err.is_timeout() {
            UpstreamError::Timeout(message)
        } else if err.is_connect() {
            UpstreamError::Connect(message)
        } else if err.is_decode() {
            UpstreamError::Decode(message)
        } else {
            UpstreamError::Request(message)
        }
    }
}

/// `err` followed by each distinct cause in its source chain.
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Replace every occurrence of the credential in `body`.
pub fn redact_bytes(body: Bytes, key: Option<&ApiKey>) -> Bytes {
    let Some(secret) = key.map(ApiKey::expose).filter(|s| !s.is_empty()) else {
        return body;
    };
    let needle = secret.as_bytes();
    if find(&body, needle).is_none() {
        return body;
    }

    let mut out = Vec::with_capacity(body.len());
    let mut rest: &[u8] = &body;
    while let Some(pos) = find(rest, needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(REDACTED);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    Bytes::from(out)
}

/// String flavour of [`redact_bytes`].
pub fn redact_str(message: &str, key: Option<&ApiKey>) -> String {
    match key.map(ApiKey::expose).filter(|s| !s.is_empty()) {
        Some(secret) => message.replace(secret, "[REDACTED]"),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_every_occurrence() {
        let key = ApiKey::new("s3cret");
        let body = Bytes::from_static(b"{\"echo\":\"s3cret\",\"again\":\"xs3cretx\"}");
        let redacted = redact_bytes(body, Some(&key));
        assert_eq!(
            &redacted[..],
            b"{\"echo\":\"[REDACTED]\",\"again\":\"x[REDACTED]x\"}"
        );
    }

    #[test]
    fn untouched_without_match_or_key() {
        let body = Bytes::from_static(b"{\"ok\":true}");
        let key = ApiKey::new("s3cret");
        assert_eq!(redact_bytes(body.clone(), Some(&key)), body);
        assert_eq!(redact_bytes(body.clone(), None), body);
        assert_eq!(redact_bytes(body.clone(), Some(&ApiKey::new(""))), body);
    }

    #[test]
    fn redacts_messages() {
        let key = ApiKey::new("abc");
        assert_eq!(redact_str("key=abc failed", Some(&key)), "key=[REDACTED] failed");
        assert_eq!(redact_str("nothing here", None), "nothing here");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct Layer {
        message: &'static str,
        #[source]
        source: Option<Box<Layer>>,
    }

    fn chain(messages: &[&'static str]) -> Layer {
        messages
            .iter()
            .copied()
            .rev()
            .fold(None, |source, message| {
                Some(Layer {
                    message,
                    source: source.map(Box::new),
                })
            })
            .unwrap()
    }

    #[test]
    fn describe_joins_causes() {
        let err = chain(&[
            "error sending request",
            "tcp connect error",
            "Connection refused (os error 111)",
        ]);
        assert_eq!(
            describe(&err),
            "error sending request: tcp connect error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn describe_skips_repeated_causes() {
        let err = chain(&["dns error: lookup failed", "lookup failed"]);
        assert_eq!(describe(&err), "dns error: lookup failed");
    }
}
