//! Typed error enum for the `user-validate-core` library API.
//!
//! Library consumers can match on specific variants. Binaries convert these
//! to `anyhow::Error` at the boundary for richer context messages.

use crate::validator::ValidationError;

/// Errors produced by `user-validate-core` operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A message failed one or more validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Protobuf decoding failure (e.g. a malformed `google.rpc.BadRequest`).
    #[error("failed to decode protobuf message: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Base64 decoding failure for an error detail payload.
    #[error("failed to decode base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A `google.protobuf.Any` carried a type other than the one requested.
    #[error("unexpected detail type '{actual}', expected '{expected}'")]
    UnexpectedDetailType {
        /// The type URL that was requested.
        expected: &'static str,
        /// The type URL found in the payload.
        actual: String,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    };

    #[test]
    fn unexpected_detail_type_names_both_types() {
        let err = Error::UnexpectedDetailType {
            expected: "type.googleapis.com/google.rpc.BadRequest",
            actual: "type.googleapis.com/google.rpc.ErrorInfo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("google.rpc.BadRequest"), "{msg}");
        assert!(msg.contains("google.rpc.ErrorInfo"), "{msg}");
    }
}
