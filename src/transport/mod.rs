//! HTTP plumbing shared by both client versions.
//!
//! ## Data Flow
//!
//! ```text
//! options ──▶ canonical ──▶ signer ──▶ http ──▶ decode
//! (typed)     (ordered map)  (v8 only)  (retry)  (success | Api error)
//! ```
//!
//! 1. [`canonical`]: flatten request options into the ordered map that
//!    feeds both the signature and GET query strings
//! 2. [`signer`]: HMAC-SHA256 request signature for v8
//! 3. [`encode`]: read uploads; base64 for v8, multipart for v7
//! 4. [`http`]: send with headers, timeout and backoff retry, then tell
//!    a success body apart from an error body

pub mod canonical;
pub mod encode;
pub mod http;
pub mod signer;

pub use http::Transport;

/// The two incompatible Veryfi API generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V7,
    V8,
}

impl ApiVersion {
    /// Path segment under `/api`.
    pub fn path(self) -> &'static str {
        match self {
            ApiVersion::V7 => "v7",
            ApiVersion::V8 => "v8",
        }
    }

    /// Only v8 requests carry a signature.
    pub fn signs_requests(self) -> bool {
        matches!(self, ApiVersion::V8)
    }
}

/// Join a host and path segments into a URL.
///
/// A bare host is reached over `https`; a host that already names its scheme
/// is kept as-is. Empty segments are dropped and no trailing `/` is added.
pub fn build_url(host: &str, segments: &[&str]) -> String {
    let host = host.trim_end_matches('/');
    let mut url = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    for segment in segments.iter().map(|s| s.trim_matches('/')) {
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// Route templates relative to the API base URL.
pub mod uri {
    pub const DOCUMENTS: &str = "/partner/documents/";
    pub const GLOBAL_TAGS: &str = "/partner/tags/";

    pub fn document(document_id: i64) -> String {
        format!("/partner/documents/{document_id}")
    }

    pub fn line_items(document_id: i64) -> String {
        format!("/partner/documents/{document_id}/line-items/")
    }

    pub fn line_item(document_id: i64, line_item_id: i64) -> String {
        format!("/partner/documents/{document_id}/line-items/{line_item_id}")
    }

    pub fn document_tags(document_id: i64) -> String {
        format!("/partner/documents/{document_id}/tags/")
    }

    pub fn document_tag(document_id: i64, tag_id: i64) -> String {
        format!("/partner/documents/{document_id}/tags/{tag_id}")
    }

    pub fn global_tag(tag_id: i64) -> String {
        format!("/partner/tags/{tag_id}")
    }
}
