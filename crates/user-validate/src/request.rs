//! Bridges Axum HTTP requests to [`tonic::Request`].

use http::HeaderMap;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::Request;

/// HTTP headers copied into tonic metadata so handlers can log and trace
/// the caller the same way they would on a native gRPC connection.
pub const FORWARDED_HEADERS: &[&str] = &[
    "user-agent",
    "x-request-id",
    "x-forwarded-for",
    "connect-protocol-version",
];

/// Build a [`tonic::Request`] from a decoded body and the HTTP headers.
///
/// Only [`FORWARDED_HEADERS`] are copied. Values that are not valid ASCII
/// metadata are skipped instead of failing the request.
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use user_validate::build_tonic_request;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-request-id", "abc-123".parse().unwrap());
///
/// let req = build_tonic_request("body", &headers);
/// assert_eq!(req.metadata().get("x-request-id").unwrap(), "abc-123");
/// ```
pub fn build_tonic_request<T>(body: T, headers: &HeaderMap) -> Request<T> {
    let mut req = Request::new(body);
    let metadata = req.metadata_mut();

    for &name in FORWARDED_HEADERS {
        let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        let (Ok(key), Ok(value)) = (
            name.parse::<MetadataKey<Ascii>>(),
            value.parse::<MetadataValue<Ascii>>(),
        ) else {
            continue;
        };
        metadata.insert(key, value);
    }

    req
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_known_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "connect-es/2.0".parse().unwrap());
        headers.insert("x-request-id", "req-1".parse().unwrap());
        headers.insert("x-forwarded-for", "1.2.3.4".parse().unwrap());
        headers.insert("connect-protocol-version", "1".parse().unwrap());

        let req = build_tonic_request((), &headers);
        let meta = req.metadata();
        assert_eq!(meta.get("user-agent").unwrap(), "connect-es/2.0");
        assert_eq!(meta.get("x-request-id").unwrap(), "req-1");
        assert_eq!(meta.get("x-forwarded-for").unwrap(), "1.2.3.4");
        assert_eq!(meta.get("connect-protocol-version").unwrap(), "1");
    }

    #[test]
    fn ignores_other_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer tok".parse().unwrap());
        headers.insert("cookie", "a=b".parse().unwrap());

        let req = build_tonic_request((), &headers);
        assert!(req.metadata().is_empty());
    }

    #[test]
    fn skips_non_ascii_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "user-agent",
            http::HeaderValue::from_bytes("bot/ü".as_bytes()).unwrap(),
        );
        headers.insert("x-request-id", "ok".parse().unwrap());

        let req = build_tonic_request((), &headers);
        assert!(req.metadata().get("user-agent").is_none());
        assert_eq!(req.metadata().get("x-request-id").unwrap(), "ok");
    }

    #[test]
    fn keeps_body() {
        let req = build_tonic_request(42_u8, &HeaderMap::new());
        assert_eq!(*req.get_ref(), 42);
    }
}
