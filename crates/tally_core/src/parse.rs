use serde_json::Value;

/// Upstream error code meaning the access token has been invalidated.
pub const TOKEN_INVALIDATED_CODE: i64 = 190;

/// Result of probing an engagement payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementOutcome {
    /// An engagement count was extracted; zero when no shape matched.
    Counted(u64),
    /// The payload carried the token-invalidated error code. The caller
    /// decides whether to persist the expiry; parsing itself has no side
    /// effects.
    Unauthorized,
}

/// Extract an engagement count from an untyped API payload.
///
/// The provider changed its response shape across API versions, so the
/// shapes are probed in a fixed priority order with no version detection:
///
/// 1. `og_object.engagement.count`
/// 2. `error.code == 190` (token invalidated)
/// 3. flat `engagement` with `reaction_count`, `comment_count` and
///    `share_count`, summed
/// 4. anything else counts as zero ("no data", not an error)
pub fn parse_engagement(body: &Value) -> EngagementOutcome {
    if let Some(count) = body
        .get("og_object")
        .and_then(|og| og.get("engagement"))
        .and_then(|engagement| engagement.get("count"))
        .and_then(Value::as_u64)
    {
        return EngagementOutcome::Counted(count);
    }

    if let Some(code) = body
        .get("error")
        .and_then(|error| error.get("code"))
        .and_then(Value::as_i64)
    {
        if code == TOKEN_INVALIDATED_CODE {
            return EngagementOutcome::Unauthorized;
        }
        // Other error codes carry no count; fall through to zero.
    }

    if let Some(engagement) = body.get("engagement") {
        let counter = |field: &str| engagement.get(field).and_then(Value::as_u64);
        if let (Some(reactions), Some(comments), Some(shares)) = (
            counter("reaction_count"),
            counter("comment_count"),
            counter("share_count"),
        ) {
            return EngagementOutcome::Counted(reactions + comments + shares);
        }
    }

    EngagementOutcome::Counted(0)
}
