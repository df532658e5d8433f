use serde::Serialize;

use crate::AccessToken;

/// Script-injection descriptor for the unauthenticated client-side fetch
/// path.
///
/// Emitted on page render when no usable server-side token exists. The
/// client script fetches the count itself and posts it back to the
/// submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientTrigger {
    pub post_id: u64,
    pub canonical_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_url: Option<String>,
}

impl ClientTrigger {
    /// Build the descriptor when the token cannot back a server-side fetch.
    pub fn when_unusable(
        token: &AccessToken,
        post_id: u64,
        canonical_url: &str,
        recovery_url: Option<&str>,
    ) -> Option<Self> {
        if token.is_usable() {
            return None;
        }
        Some(Self {
            post_id,
            canonical_url: canonical_url.to_string(),
            recovery_url: recovery_url.map(ToOwned::to_owned),
        })
    }
}
