//! Redaction of sensitive fields before request/response bodies are logged.

use serde_json::Value;

/// Replacement written over every sensitive value.
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_KEY_FRAGMENTS: [&str; 4] = ["password", "token", "secret", "signature"];

pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS
        .iter()
        .any(|fragment| key.contains(fragment))
}

/// Replaces, in place and at any depth, the value of every object key that
/// names a credential.
pub fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *value = Value::String(REDACTED.to_string());
                } else {
                    redact_json(value);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}

/// Renders a raw JSON body for the log with credentials redacted.
pub fn redacted_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<empty>".to_string();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut value) => {
            redact_json(&mut value);
            value.to_string()
        }
        Err(_) => format!("<unparseable JSON, {} bytes>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_top_level_credentials() {
        let mut body = json!({
            "email": "a@b.io",
            "password": "hunter2",
            "token": "abc.def.ghi"
        });
        redact_json(&mut body);
        assert_eq!(
            body,
            json!({ "email": "a@b.io", "password": REDACTED, "token": REDACTED })
        );
    }

    #[test]
    fn test_redacts_nested_and_camel_case_keys() {
        let mut body = json!({
            "user": { "newPassword": "x", "name": "Ada" },
            "sessions": [{ "accessToken": "t1" }, { "refresh_token": "t2" }],
            "clientSecret": "s"
        });
        redact_json(&mut body);
        assert_eq!(body["user"]["newPassword"], REDACTED);
        assert_eq!(body["user"]["name"], "Ada");
        assert_eq!(body["sessions"][0]["accessToken"], REDACTED);
        assert_eq!(body["sessions"][1]["refresh_token"], REDACTED);
        assert_eq!(body["clientSecret"], REDACTED);
    }

    #[test]
    fn test_redacts_whole_subtree_under_sensitive_key() {
        let mut body = json!({ "tokens": { "a": 1, "b": 2 } });
        redact_json(&mut body);
        assert_eq!(body, json!({ "tokens": REDACTED }));
    }

    #[test]
    fn test_redacted_body_rendering() {
        assert_eq!(redacted_body(b""), "<empty>");
        assert_eq!(redacted_body(b"{not json"), "<unparseable JSON, 9 bytes>");
        assert_eq!(
            redacted_body(br#"{"meetingNumber":"1","signature":"x"}"#),
            r#"{"meetingNumber":"1","signature":"[REDACTED]"}"#
        );
    }
}
