use std::sync::Once;

use serde_json::json;
use tally_core::{parse_engagement, EngagementOutcome};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tally_logging::initialize_for_tests);
}

#[test]
fn object_graph_shape_returns_count() {
    init_logging();
    let body = json!({
        "og_object": {
            "engagement": { "count": 1234 }
        }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Counted(1234));
}

#[test]
fn token_invalidated_error_is_unauthorized() {
    init_logging();
    let body = json!({
        "error": { "code": 190, "message": "Error validating access token" }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Unauthorized);
}

#[test]
fn other_error_codes_count_as_zero() {
    init_logging();
    let body = json!({
        "error": { "code": 4, "message": "Application request limit reached" }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Counted(0));
}

#[test]
fn flat_engagement_shape_sums_sub_counters() {
    init_logging();
    let body = json!({
        "engagement": {
            "reaction_count": 7,
            "comment_count": 3,
            "share_count": 12
        }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Counted(22));
}

#[test]
fn flat_engagement_with_missing_sub_counter_counts_as_zero() {
    init_logging();
    let body = json!({
        "engagement": { "reaction_count": 7, "share_count": 12 }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Counted(0));
}

#[test]
fn object_graph_shape_wins_over_flat_engagement() {
    init_logging();
    let body = json!({
        "og_object": {
            "engagement": { "count": 50 }
        },
        "engagement": {
            "reaction_count": 1,
            "comment_count": 1,
            "share_count": 1
        }
    });
    assert_eq!(parse_engagement(&body), EngagementOutcome::Counted(50));
}

#[test]
fn unrecognized_shapes_count_as_zero() {
    init_logging();
    for body in [
        json!({}),
        json!(null),
        json!([1, 2, 3]),
        json!({ "og_object": { "id": "123" } }),
        json!({ "og_object": { "engagement": { "count": "not a number" } } }),
        json!("plain string"),
    ] {
        assert_eq!(
            parse_engagement(&body),
            EngagementOutcome::Counted(0),
            "payload: {body}"
        );
    }
}
