//! Header helpers for conditional page requests.

use axum::http::{header::IF_NONE_MATCH, HeaderMap};
use sha2::{Digest, Sha256};

/// Extension trait for reading request headers.
pub trait HeaderMapExt {
    /// Whether `If-None-Match` lists the given entity tag (or `*`).
    fn if_none_match(&self, etag: &str) -> bool;
}

impl HeaderMapExt for HeaderMap {
    fn if_none_match(&self, etag: &str) -> bool {
        let Some(value) = self.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) else {
            return false;
        };
        // Weak comparison: W/"x" matches "x"
        let wanted = etag.trim_start_matches("W/");
        value
            .split(',')
            .map(|tag| tag.trim().trim_start_matches("W/"))
            .any(|tag| tag == "*" || tag == wanted)
    }
}

/// Strong entity tag for a response body
pub fn etag_for(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    // First 16 bytes of the hash, as 32 hex characters
    format!("\"{}\"", hex::encode(&digest[..16]))
}
