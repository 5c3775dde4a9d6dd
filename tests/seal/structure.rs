use summary_seal::seal::{SummaryInput, codec, seal, signer, unseal};

const SECRET: &[u8] = b"s3cr3t";

/// Sign an arbitrary payload with the real secret, bypassing `seal`.
fn forge_with_secret(prefix: &str, payload_json: &str) -> String {
    let payload_segment = codec::encode(payload_json);
    let signature = signer::sign(SECRET, &payload_segment).unwrap();
    format!("{prefix}.{payload_segment}.{signature}")
}

#[test]
fn well_formed_hand_signed_payload_is_accepted() {
    let token = forge_with_secret(
        "SS1",
        r#"{"v":1,"uid":"u1","taskId":"2-1","summary":"hello","ts":1700000000000}"#,
    );
    let payload = unseal(SECRET, &token).unwrap();
    assert_eq!(payload.issued_at_ms, 1_700_000_000_000);
}

#[test]
fn missing_task_id_is_rejected() {
    let token = forge_with_secret("SS1", r#"{"v":1,"uid":"u1","summary":"hello","ts":1}"#);
    assert!(unseal(SECRET, &token).is_none());
}

#[test]
fn other_versions_are_rejected() {
    for version in ["0", "2", "-1", "1.5", "\"1\"", "null"] {
        let token = forge_with_secret(
            "SS1",
            &format!(r#"{{"v":{version},"uid":"u1","taskId":"t1","summary":"s","ts":1}}"#),
        );
        assert!(unseal(SECRET, &token).is_none(), "version {version}");
    }
}

#[test]
fn non_string_summary_is_rejected() {
    for summary in ["7", "null", "[]", "{}", "true"] {
        let token = forge_with_secret(
            "SS1",
            &format!(r#"{{"v":1,"uid":"u1","taskId":"t1","summary":{summary},"ts":1}}"#),
        );
        assert!(unseal(SECRET, &token).is_none(), "summary {summary}");
    }
}

#[test]
fn non_numeric_timestamp_is_rejected() {
    let token = forge_with_secret(
        "SS1",
        r#"{"v":1,"uid":"u1","taskId":"t1","summary":"s","ts":"yesterday"}"#,
    );
    assert!(unseal(SECRET, &token).is_none());
}

#[test]
fn prefix_is_enforced() {
    let good = seal(SECRET, &SummaryInput::new("u1", "2-1", "hello")).unwrap();
    let rest = good.strip_prefix("SS1").unwrap();

    for prefix in ["XX1", "SS2", "ss1", "", "SS1 "] {
        assert!(unseal(SECRET, &format!("{prefix}{rest}")).is_none(), "{prefix:?}");
    }
}

#[test]
fn segment_count_is_enforced() {
    let good = seal(SECRET, &SummaryInput::new("u1", "2-1", "hello")).unwrap();
    let segments: Vec<&str> = good.split('.').collect();

    let two = format!("{}.{}", segments[0], segments[1]);
    let four = format!("{good}.extra");
    let trailing_dot = format!("{good}.");

    for token in [two.as_str(), four.as_str(), trailing_dot.as_str(), "", "SS1", ".."] {
        assert!(unseal(SECRET, token).is_none(), "{token:?}");
    }
}

#[test]
fn garbage_never_panics() {
    for token in [
        "SS1.!!!.???",
        "SS1.\u{0}.\u{0}",
        "SS1.%%%%.",
        "SS1..",
        "SS1.e30.",
        "🙂.🙂.🙂",
    ] {
        assert!(unseal(SECRET, token).is_none());
    }
}
