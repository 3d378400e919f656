//! Result classification for transport-successful submissions.
//!
//! Only called once the HTTP layer has confirmed a 2xx status. The `result`
//! field must equal [`MATCH_TOKEN`] exactly; every other body is a failure.

use crate::models::VerificationOutcome;
use serde_json::Value;

/// The single canonical success token returned by the backend
pub const MATCH_TOKEN: &str = "Match";

/// Classify a decoded submit response body.
pub fn classify(body: &Value) -> VerificationOutcome {
    match body.get("result").and_then(Value::as_str) {
        Some(token) if token == MATCH_TOKEN => VerificationOutcome::Pass,
        _ => VerificationOutcome::Fail,
    }
}

/// Classify a raw response body. Malformed JSON is a failure.
pub fn classify_body(raw: &str) -> VerificationOutcome {
    match serde_json::from_str::<Value>(raw) {
        Ok(body) => classify(&body),
        Err(e) => {
            log::debug!("[Classifier] Unparseable submit body ({}), classifying as Fail", e);
            VerificationOutcome::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_canonical_token_passes() {
        assert_eq!(
            classify_body(r#"{"status": "success", "result": "Match"}"#),
            VerificationOutcome::Pass
        );
    }

    #[test]
    fn test_other_tokens_fail() {
        for body in [
            json!({"result": "No Match"}),
            json!({"result": "NoMatch"}),
            json!({"result": "match"}),
            json!({"result": " Match"}),
            json!({"result": 1}),
            json!({"result": true}),
            json!({"result": null}),
            json!({"status": "success"}),
            json!(["Match"]),
            json!("Match"),
        ] {
            assert_eq!(classify(&body), VerificationOutcome::Fail, "body: {}", body);
        }
    }

    #[test]
    fn test_malformed_and_empty_bodies_fail() {
        assert_eq!(classify_body(""), VerificationOutcome::Fail);
        assert_eq!(classify_body("{result: Match}"), VerificationOutcome::Fail);
        assert_eq!(classify_body("<html>502</html>"), VerificationOutcome::Fail);
    }

    proptest! {
        #[test]
        fn prop_only_exact_token_passes(token in "\\PC{0,12}") {
            let expected = if token == MATCH_TOKEN {
                VerificationOutcome::Pass
            } else {
                VerificationOutcome::Fail
            };
            prop_assert_eq!(classify(&json!({ "result": token })), expected);
        }

        #[test]
        fn prop_arbitrary_text_never_panics(raw in "\\PC{0,64}") {
            let _ = classify_body(&raw);
        }
    }
}
