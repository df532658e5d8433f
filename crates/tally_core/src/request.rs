use url::Url;

use crate::AccessToken;

/// Versioned graph endpoint the engagement request is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTarget {
    pub host: String,
    pub version: String,
}

impl Default for GraphTarget {
    fn default() -> Self {
        Self {
            host: "graph.facebook.com".to_string(),
            version: "v9.0".to_string(),
        }
    }
}

/// Build the authenticated engagement request for `page_url`.
///
/// Returns `None` when no usable token exists; that is the normal signal for
/// the caller to fall back to the unauthenticated client-side fetch path,
/// not a failure.
pub fn build_request_url(target: &GraphTarget, page_url: &str, token: &AccessToken) -> Option<Url> {
    let secret = token.secret()?;
    let base = format!("https://{}/{}/", target.host, target.version);
    // The base is assembled from host and version only; a malformed target is
    // treated the same as a missing token.
    let mut url = Url::parse(&base).ok()?;
    url.query_pairs_mut()
        .append_pair("id", page_url)
        .append_pair("fields", "engagement")
        .append_pair("access_token", secret);
    Some(url)
}
