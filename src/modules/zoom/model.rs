use devhub_core::serde::deserialize_optional_string_or_number;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for a meeting SDK signature.
///
/// `meetingNumber` may be sent as a JSON string or number. Its presence is
/// checked by the signer, not here, so the HTTP endpoint and the CLI reject
/// a missing number with the same message.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    #[schema(value_type = Option<String>, example = "85746065432")]
    pub meeting_number: Option<String>,

    /// 0 joins as participant, 1 as host
    #[serde(default)]
    #[validate(range(min = 0, max = 1, message = "role must be 0 (participant) or 1 (host)"))]
    #[schema(example = 0)]
    pub role: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_number_as_string_or_number() {
        let from_number: SignatureRequest =
            serde_json::from_str(r#"{"meetingNumber": 85746065432}"#).unwrap();
        let from_string: SignatureRequest =
            serde_json::from_str(r#"{"meetingNumber": "85746065432"}"#).unwrap();

        assert_eq!(from_number.meeting_number.as_deref(), Some("85746065432"));
        assert_eq!(from_string.meeting_number, from_number.meeting_number);
        assert_eq!(from_number.role, None);
    }

    #[test]
    fn test_role_range() {
        let host: SignatureRequest =
            serde_json::from_str(r#"{"meetingNumber": "1", "role": 1}"#).unwrap();
        assert!(host.validate().is_ok());

        let bogus: SignatureRequest =
            serde_json::from_str(r#"{"meetingNumber": "1", "role": 5}"#).unwrap();
        assert!(bogus.validate().is_err());
    }
}
