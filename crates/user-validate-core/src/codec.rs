//! Base64 transport of error detail payloads.
//!
//! Connect-protocol error bodies carry each detail as
//! `{"type": "google.rpc.BadRequest", "value": "<base64>"}`. Encoders omit
//! padding; decoders accept it either way.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use prost::Message;

use crate::proto::rpc::{BadRequest, Status};

/// Standard alphabet, unpadded output, padding-indifferent input.
pub const DETAIL_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw detail bytes for a JSON error body.
#[must_use]
pub fn encode_value(bytes: &[u8]) -> String {
    DETAIL_ENGINE.encode(bytes)
}

/// Decode a base64 detail value into raw bytes.
///
/// # Errors
///
/// Returns [`crate::Error::Base64`] for invalid base64.
pub fn decode_value(value: &str) -> crate::Result<Vec<u8>> {
    Ok(DETAIL_ENGINE.decode(value.trim())?)
}

/// Decode a base64 `google.rpc.BadRequest` payload.
///
/// # Errors
///
/// Returns [`crate::Error::Base64`] for invalid base64 or
/// [`crate::Error::Decode`] if the bytes are not a `BadRequest`.
///
/// # Examples
///
/// ```
/// use user_validate_core::codec::decode_bad_request;
///
/// let bad = decode_bad_request(
///     "CikSFHBhc3N3b3JkcyBtdXN0IG1hdGNoGhFQQVNTV09SRF9NSVNNQVRDSA==",
/// ).unwrap();
/// assert_eq!(bad.field_violations[0].reason, "PASSWORD_MISMATCH");
/// ```
pub fn decode_bad_request(value: &str) -> crate::Result<BadRequest> {
    let bytes = decode_value(value)?;
    Ok(BadRequest::decode(bytes.as_slice())?)
}

/// Decode the `google.rpc.Status` carried in a status' binary details.
///
/// Empty input decodes to a default `Status` with no details.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the bytes are malformed.
pub fn decode_status_details(bytes: &[u8]) -> crate::Result<Status> {
    Ok(Status::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::proto::rpc::FieldViolation;

    const SINGLE: &str = "CikSFHBhc3N3b3JkcyBtdXN0IG1hdGNoGhFQQVNTV09SRF9NSVNNQVRDSA==";
    const MULTIPLE: &str = "CkIKBG5hbWUSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDEgY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4KOgoFZW1haWwSI3ZhbHVlIG11c3QgYmUgYSB2YWxpZCBlbWFpbCBhZGRyZXNzGgxTVFJJTkdfRU1BSUwKRgoIcGFzc3dvcmQSKnZhbHVlIGxlbmd0aCBtdXN0IGJlIGF0IGxlYXN0IDggY2hhcmFjdGVycxoOU1RSSU5HX01JTl9MRU4=";

    fn violation(field: &str, description: &str, reason: &str) -> FieldViolation {
        FieldViolation {
            field: field.to_string(),
            description: description.to_string(),
            reason: reason.to_string(),
            localized_message: None,
        }
    }

    #[test]
    fn decodes_message_level_violation() {
        let bad = decode_bad_request(SINGLE).unwrap();
        assert_eq!(
            bad.field_violations,
            [violation("", "passwords must match", "PASSWORD_MISMATCH")]
        );
    }

    #[test]
    fn decodes_three_field_violations() {
        let bad = decode_bad_request(MULTIPLE).unwrap();
        assert_eq!(
            bad.field_violations,
            [
                violation(
                    "name",
                    "value length must be at least 1 characters",
                    "STRING_MIN_LEN"
                ),
                violation(
                    "email",
                    "value must be a valid email address",
                    "STRING_EMAIL"
                ),
                violation(
                    "password",
                    "value length must be at least 8 characters",
                    "STRING_MIN_LEN"
                ),
            ]
        );
    }

    #[test]
    fn accepts_unpadded_input_and_emits_unpadded_output() {
        let unpadded = SINGLE.trim_end_matches('=');
        let bad = decode_bad_request(unpadded).unwrap();
        assert_eq!(encode_value(&bad.encode_to_vec()), unpadded);
    }

    #[test]
    fn invalid_base64_is_reported() {
        assert!(matches!(
            decode_bad_request("not base64!"),
            Err(crate::Error::Base64(_))
        ));
    }

    #[test]
    fn non_protobuf_bytes_are_reported() {
        // 0xff is an invalid wire type
        let value = encode_value(&[0xff, 0xff, 0xff]);
        assert!(matches!(
            decode_bad_request(&value),
            Err(crate::Error::Decode(_))
        ));
    }

    #[test]
    fn empty_status_details_decode_to_default() {
        let status = decode_status_details(&[]).unwrap();
        assert_eq!(status.code, 0);
        assert!(status.details.is_empty());
    }
}
