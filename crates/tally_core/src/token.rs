/// Sentinel value the token store uses to mark an invalidated token.
pub const EXPIRED_SENTINEL: &str = "expired";

/// Authentication state for the provider's API tier.
///
/// Supplied by the external token store; this module never mutates it other
/// than asking the store to record expiry after an upstream auth failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessToken {
    Absent,
    Expired,
    Valid(String),
}

impl AccessToken {
    /// Decode the raw stored value. Empty or missing means absent; the
    /// literal sentinel means expired; anything else is a usable secret.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some(value) if value.is_empty() => Self::Absent,
            Some(EXPIRED_SENTINEL) => Self::Expired,
            Some(value) => Self::Valid(value.to_string()),
        }
    }

    /// Whether a server-side authenticated request can be made.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The secret to embed in a request, if any.
    pub fn secret(&self) -> Option<&str> {
        match self {
            Self::Valid(secret) => Some(secret),
            Self::Absent | Self::Expired => None,
        }
    }
}
