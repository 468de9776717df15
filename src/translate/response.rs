//! Fast response → standard response.

use std::io;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;

use crate::config::CorruptPayloadPolicy;
use crate::fast::FastResponse;
use crate::observability::metrics;
use crate::response::Response;
use crate::support::{body_from_bytes, contains_ignore_case, status_text, ResponseBody};

/// Build a standard response from whatever state `fast` is in.
///
/// Never fails: undecodable payloads are handled by `policy`, and headers
/// that `http` cannot represent are skipped.
pub fn translate_response(fast: &FastResponse, policy: CorruptPayloadPolicy) -> Response {
    let (proto, proto_major, proto_minor) = if fast.is_http11() {
        ("HTTP/1.1", 1, 1)
    } else {
        ("HTTP/1.0", 1, 0)
    };

    let mut headers = HeaderMap::new();
    fast.visit_all_headers(|name, value| {
        if !keep_header(name, value) {
            return;
        }
        match (HeaderName::from_bytes(name), HeaderValue::from_bytes(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::debug!(
                name = %String::from_utf8_lossy(name),
                "Skipping unrepresentable response header"
            ),
        }
    });

    tracing::debug!(headers = ?headers, "Translated response headers");

    let body = decode_body(fast, policy);
    let status_code = fast.status_code();

    Response {
        status: status_text(status_code),
        status_code,
        proto,
        proto_major,
        proto_minor,
        headers,
        body,
    }
}

/// Header filter applied while copying response headers.
///
/// A pair is kept when its value lacks "gzip", or when it is not a `Vary`
/// header listing `Accept-Encoding`. The one dropped combination is a `Vary`
/// value naming both `Accept-Encoding` and gzip.
pub(crate) fn keep_header(name: &[u8], value: &[u8]) -> bool {
    !contains_ignore_case(value, "gzip")
        || !(contains_ignore_case(name, "vary") && contains_ignore_case(value, "accept-encoding"))
}

fn decode_body(fast: &FastResponse, policy: CorruptPayloadPolicy) -> Option<ResponseBody> {
    let encoding = fast.peek_header("Content-Encoding");

    let body = if contains_ignore_case(encoding, "gzip") {
        decoded("gzip", fast.body_gunzip(), fast, policy)
    } else if contains_ignore_case(encoding, "deflate") {
        decoded("deflate", fast.body_inflate(), fast, policy)
    } else {
        Some(raw_body(fast))
    };

    if let Some(body) = &body {
        tracing::trace!(body_len = body.len(), "Translated response body");
    }
    body
}

fn decoded(
    encoding: &'static str,
    result: io::Result<Vec<u8>>,
    fast: &FastResponse,
    policy: CorruptPayloadPolicy,
) -> Option<ResponseBody> {
    match result {
        Ok(bytes) => Some(body_from_bytes(bytes)),
        Err(e) => {
            tracing::warn!(encoding, error = %e, policy = ?policy, "Failed to decode response body");
            metrics::record_decode_failure(encoding);
            match policy {
                CorruptPayloadPolicy::Degrade => None,
                CorruptPayloadPolicy::Raw => Some(raw_body(fast)),
            }
        }
    }
}

fn raw_body(fast: &FastResponse) -> ResponseBody {
    body_from_bytes(Bytes::copy_from_slice(fast.body()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use http::Version;
    use std::io::{Read, Write};

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn read_body(response: Response) -> String {
        let mut out = String::new();
        response.body.unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_plain_body_and_status() {
        let mut fast = FastResponse::new();
        fast.set_status_code(200);
        fast.set_http11(true);
        fast.set_body(b"ok");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert_eq!(response.status, "200 OK");
        assert_eq!(response.status_code, 200);
        assert_eq!(response.proto, "HTTP/1.1");
        assert_eq!((response.proto_major, response.proto_minor), (1, 1));
        assert_eq!(response.version(), Version::HTTP_11);
        assert_eq!(read_body(response), "ok");
    }

    #[test]
    fn test_non_http11_reported_as_http10() {
        let mut fast = FastResponse::new();
        fast.set_status_code(404);

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert_eq!(response.proto, "HTTP/1.0");
        assert_eq!((response.proto_major, response.proto_minor), (1, 0));
        assert_eq!(response.status, "404 Not Found");
    }

    #[test]
    fn test_unknown_status_has_trailing_space() {
        let mut fast = FastResponse::new();
        fast.set_status_code(799);
        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(response.status, "799 ");
    }

    #[test]
    fn test_gzip_body_decoded() {
        let mut fast = FastResponse::new();
        fast.set_status_code(200);
        fast.add_header("Content-Encoding", b"gzip");
        fast.set_body(&gzip(b"plain text payload"));

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(read_body(response), "plain text payload");
    }

    #[test]
    fn test_gzip_detection_ignores_case() {
        let mut fast = FastResponse::new();
        fast.add_header("content-encoding", b"GZIP");
        fast.set_body(&gzip(b"shouting"));

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(read_body(response), "shouting");
    }

    #[test]
    fn test_multi_member_gzip_fully_decoded() {
        let mut body = gzip(b"hello ");
        body.extend_from_slice(&gzip(b"world"));

        let mut fast = FastResponse::new();
        fast.set_status_code(200);
        fast.add_header("Content-Encoding", b"gzip");
        fast.set_body(&body);

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(read_body(response), "hello world");
    }

    #[test]
    fn test_deflate_body_decoded() {
        let mut fast = FastResponse::new();
        fast.add_header("Content-Encoding", b"deflate");
        fast.set_body(&zlib(b"inflated"));

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(read_body(response), "inflated");
    }

    #[test]
    fn test_corrupt_gzip_degrades_to_absent_body() {
        let mut fast = FastResponse::new();
        fast.set_status_code(200);
        fast.add_header("Content-Encoding", b"gzip");
        fast.set_body(b"\x1f\x8b not really gzip");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert!(response.body.is_none());
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_corrupt_deflate_raw_policy_keeps_bytes() {
        let mut fast = FastResponse::new();
        fast.add_header("Content-Encoding", b"deflate");
        fast.set_body(b"garbage");

        let response = translate_response(&fast, CorruptPayloadPolicy::Raw);
        assert_eq!(read_body(response), "garbage");
    }

    #[test]
    fn test_unknown_encoding_passes_raw_bytes() {
        let mut fast = FastResponse::new();
        fast.add_header("Content-Encoding", b"br");
        fast.set_body(b"\x0b\x02\x80opaque");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(response.body.unwrap().into_bytes().as_ref(), b"\x0b\x02\x80opaque");
    }

    #[test]
    fn test_headers_copied_with_overwrite() {
        let mut fast = FastResponse::new();
        fast.add_header("Content-Type", b"text/plain");
        fast.add_header("Set-Cookie", b"a=1");
        fast.add_header("Set-Cookie", b"b=2");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert_eq!(response.headers["content-type"], "text/plain");
        assert_eq!(response.headers.get_all("set-cookie").iter().count(), 1);
        assert_eq!(response.headers["set-cookie"], "b=2");
    }

    #[test]
    fn test_vary_accept_encoding_with_gzip_is_suppressed() {
        let mut fast = FastResponse::new();
        fast.add_header("Vary", b"Accept-Encoding, gzip");
        fast.add_header("X-Other", b"kept");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert!(response.headers.get("vary").is_none());
        assert_eq!(response.headers["x-other"], "kept");
    }

    #[test]
    fn test_plain_vary_accept_encoding_passes_through() {
        let mut fast = FastResponse::new();
        fast.add_header("Vary", b"Accept-Encoding");

        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);
        assert_eq!(response.headers["vary"], "Accept-Encoding");
    }

    #[test]
    fn test_suppression_rule_edge_cases() {
        // Only the three-way combination is dropped.
        assert!(!keep_header(b"Vary", b"accept-encoding;gzip"));
        assert!(keep_header(b"Vary", b"Origin, gzip"));
        assert!(keep_header(b"Vary", b"Accept-Encoding"));
        assert!(keep_header(b"Content-Encoding", b"gzip"));
        assert!(keep_header(b"X-Note", b"Accept-Encoding gzip"));
        assert!(!keep_header(b"X-Vary-Hint", b"Accept-Encoding=gzip"));
    }

    #[test]
    fn test_zero_valued_response() {
        // Deliberately 0 / HTTP/1.0 rather than 200 / HTTP/1.1, so a failed
        // exchange can never be mistaken for a successful one.
        let fast = FastResponse::new();
        let response = translate_response(&fast, CorruptPayloadPolicy::Degrade);

        assert_eq!(response.status, "0 ");
        assert_eq!(response.status_code, 0);
        assert_eq!(response.proto, "HTTP/1.0");
        assert!(response.headers.is_empty());
        assert!(response.body.unwrap().is_empty());
    }
}
