use std::sync::Once;

use tally_core::{
    auth_notice, validate_submission, AccessToken, AuthNotice, ClientTrigger, InvalidSubmission,
    Submission,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tally_logging::initialize_for_tests);
}

#[test]
fn numeric_fields_validate() {
    init_logging();
    assert_eq!(
        validate_submission("42", "117"),
        Ok(Submission {
            post_id: 42,
            share_counts: 117
        })
    );
}

#[test]
fn non_numeric_post_id_is_rejected() {
    init_logging();
    assert_eq!(validate_submission("abc", "117"), Err(InvalidSubmission));
}

#[test]
fn non_numeric_count_is_rejected() {
    init_logging();
    assert_eq!(validate_submission("42", "lots"), Err(InvalidSubmission));
    assert_eq!(validate_submission("42", "-5"), Err(InvalidSubmission));
    assert_eq!(validate_submission("42", ""), Err(InvalidSubmission));
}

#[test]
fn rejection_text_is_fixed() {
    init_logging();
    assert_eq!(InvalidSubmission.to_string(), "Invalid data");
}

#[test]
fn absent_token_prompts_connect() {
    init_logging();
    assert_eq!(
        auth_notice(&AccessToken::Absent, 2026, 8),
        Some(AuthNotice::ConnectPrompt)
    );
}

#[test]
fn expired_token_prompts_reauth_keyed_by_month() {
    init_logging();
    let notice = auth_notice(&AccessToken::Expired, 2026, 8).unwrap();
    assert_eq!(
        notice,
        AuthNotice::ReauthPrompt {
            dismiss_key: "facebook_reauth_2026_08".to_string()
        }
    );
    // A dismissal in one month must not suppress the next month's notice.
    let next = auth_notice(&AccessToken::Expired, 2026, 9).unwrap();
    assert_ne!(notice, next);
}

#[test]
fn valid_token_produces_no_notice() {
    init_logging();
    assert_eq!(auth_notice(&AccessToken::Valid("tok".into()), 2026, 8), None);
}

#[test]
fn trigger_is_emitted_only_without_usable_token() {
    init_logging();
    let trigger = ClientTrigger::when_unusable(
        &AccessToken::Absent,
        7,
        "https://example.com/post",
        Some("https://old.example.com/post"),
    )
    .expect("trigger for absent token");
    assert_eq!(trigger.post_id, 7);
    assert_eq!(trigger.canonical_url, "https://example.com/post");
    assert_eq!(
        trigger.recovery_url.as_deref(),
        Some("https://old.example.com/post")
    );

    assert!(ClientTrigger::when_unusable(
        &AccessToken::Valid("tok".into()),
        7,
        "https://example.com/post",
        None
    )
    .is_none());
}

#[test]
fn trigger_serializes_without_null_recovery_url() {
    init_logging();
    let trigger = ClientTrigger::when_unusable(&AccessToken::Expired, 7, "https://e.com", None)
        .expect("trigger for expired token");
    let json = serde_json::to_value(&trigger).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "post_id": 7, "canonical_url": "https://e.com" })
    );
}
