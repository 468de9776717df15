//! Caller-facing response produced by the adaptor.

use http::{HeaderMap, StatusCode, Version};

use crate::support::ResponseBody;

/// Response in the standard model.
///
/// Every field is filled by the response translator. When the transport
/// failed the values are the zero-valued ones (`status_code` 0, status
/// `"0 "`, HTTP/1.0, empty headers), so check the accompanying error first.
#[derive(Debug)]
pub struct Response {
    /// Status line, e.g. `"200 OK"`.
    pub status: String,
    pub status_code: u16,
    /// `"HTTP/1.1"` or `"HTTP/1.0"`.
    pub proto: &'static str,
    pub proto_major: u8,
    pub proto_minor: u8,
    pub headers: HeaderMap,
    /// `None` when a compressed payload could not be decoded.
    pub body: Option<ResponseBody>,
}

impl Response {
    pub fn version(&self) -> Version {
        match (self.proto_major, self.proto_minor) {
            (1, 1) => Version::HTTP_11,
            _ => Version::HTTP_10,
        }
    }

    /// Convert into an `http::Response`.
    ///
    /// Fails only for status codes `http` cannot represent, such as the
    /// zero status of a failed exchange. A missing body becomes empty.
    pub fn into_http(self) -> Result<http::Response<ResponseBody>, http::Error> {
        let status = StatusCode::from_u16(self.status_code)?;
        let version = self.version();
        let mut response = http::Response::builder()
            .status(status)
            .version(version)
            .body(self.body.unwrap_or_default())?;
        *response.headers_mut() = self.headers;
        Ok(response)
    }
}
