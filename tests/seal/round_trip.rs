use summary_seal::seal::{
    PROTOCOL_VERSION, SealedSummary, SummaryInput, TOKEN_PREFIX, codec, now_ms, seal, unseal,
};
use summary_seal::{SealError, is_valid_task_id};

#[test]
fn concrete_scenario_matches_wire_format() {
    let before = now_ms();
    let token = seal(b"s3cr3t", &SummaryInput::new("u1", "2-1", "hello")).unwrap();
    let after = now_ms();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], "SS1");
    for segment in &segments[1..] {
        assert!(
            segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    let json: serde_json::Value =
        serde_json::from_slice(&codec::decode(segments[1]).unwrap()).unwrap();
    assert_eq!(json["uid"], "u1");
    assert_eq!(json["taskId"], "2-1");
    assert_eq!(json["summary"], "hello");
    assert_eq!(json["v"], 1);
    assert!(json["ts"].is_i64());

    let payload = unseal(b"s3cr3t", &token).unwrap();
    assert_eq!(payload.version, PROTOCOL_VERSION);
    assert_eq!(payload.user_id, "u1");
    assert_eq!(payload.task_id, "2-1");
    assert_eq!(payload.summary, "hello");
    assert!((before..=after).contains(&payload.issued_at_ms));
    assert_eq!(json["ts"].as_i64(), Some(payload.issued_at_ms));

    assert!(unseal(b"wrong", &token).is_none());
}

#[test]
fn round_trip_across_inputs() {
    let cases = [
        ("s3cr3t", "u1", "t1", "plain"),
        ("k", "user@example.com", "lecture_03.pre:1", "multi\nline\tsummary"),
        ("a much longer secret value with spaces", "42", "0", "emoji 📚 and 日本語"),
        ("s3cr3t", "u1", "t1", "{\"looks\":\"like json\"}"),
    ];

    for (secret, user_id, task_id, summary) in cases {
        let token = seal(secret.as_bytes(), &SummaryInput::new(user_id, task_id, summary)).unwrap();
        let payload = unseal(secret.as_bytes(), &token).unwrap();
        assert_eq!(
            payload,
            SealedSummary {
                version: 1,
                user_id: user_id.into(),
                task_id: task_id.into(),
                summary: summary.into(),
                issued_at_ms: payload.issued_at_ms,
            }
        );
        assert!((now_ms() - payload.issued_at_ms).abs() < 60_000);
    }
}

#[test]
fn empty_summary_is_allowed() {
    let token = seal(b"s3cr3t", &SummaryInput::new("u1", "t1", "")).unwrap();
    assert_eq!(unseal(b"s3cr3t", &token).unwrap().summary, "");
}

#[test]
fn wrong_secret_is_rejected() {
    let token = seal(b"secret-a", &SummaryInput::new("u1", "t1", "s")).unwrap();
    for other in ["secret-b", "secret-a ", "Secret-a", "secret-"] {
        assert!(unseal(other.as_bytes(), &token).is_none());
    }
}

#[test]
fn missing_identifiers_fail_loudly() {
    assert!(matches!(
        seal(b"", &SummaryInput::new("u1", "t1", "s")),
        Err(SealError::InvalidInput(_))
    ));
    assert!(matches!(
        seal(b"k", &SummaryInput::new("", "t1", "s")),
        Err(SealError::InvalidInput(_))
    ));
    assert!(matches!(
        seal(b"k", &SummaryInput::new("u1", "", "s")),
        Err(SealError::InvalidInput(_))
    ));
}

#[test]
fn each_seal_is_a_fresh_token_for_new_content() {
    let first = seal(b"k", &SummaryInput::new("u1", "t1", "v1")).unwrap();
    let second = seal(b"k", &SummaryInput::new("u1", "t1", "v2")).unwrap();
    assert_ne!(first, second);
    assert!(first.starts_with(TOKEN_PREFIX));
}

#[test]
fn task_id_validator_examples() {
    assert!(!is_valid_task_id("bad id!"));
    assert!(is_valid_task_id("2-1"));
}
