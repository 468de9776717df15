//! Incoming response in the transport's own representation.

use std::io::{self, Read};

use flate2::read::{MultiGzDecoder, ZlibDecoder};

use crate::fast::pool::Recycle;

/// Mutable, reusable response filled in by a [`FastTransport`].
///
/// A freshly acquired response is zero-valued: status 0, HTTP/1.0, no
/// headers, empty body. Transports leave it that way when they fail.
///
/// [`FastTransport`]: crate::transport::FastTransport
#[derive(Debug, Default)]
pub struct FastResponse {
    status_code: u16,
    http11: bool,
    headers: Vec<(String, Vec<u8>)>,
    body: Vec<u8>,
}

impl FastResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_code(&mut self, code: u16) {
        self.status_code = code;
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_http11(&mut self, http11: bool) {
        self.http11 = http11;
    }

    pub fn is_http11(&self) -> bool {
        self.http11
    }

    /// Append a header. Repeated names are kept as separate entries.
    pub fn add_header(&mut self, name: &str, value: &[u8]) {
        self.headers.push((name.to_string(), value.to_vec()));
    }

    /// First value for `name` (case-insensitive), empty if absent.
    pub fn peek_header(&self, name: &str) -> &[u8] {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_slice())
            .unwrap_or(&[])
    }

    /// Call `f` for every header entry in wire order.
    pub fn visit_all_headers<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &[u8]),
    {
        for (name, value) in &self.headers {
            f(name.as_bytes(), value);
        }
    }

    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    /// Raw body bytes as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as gzip, every concatenated member included.
    pub fn body_gunzip(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.body.len() * 2);
        MultiGzDecoder::new(self.body.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }

    /// Body decoded as zlib-wrapped deflate.
    pub fn body_inflate(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.body.len() * 2);
        ZlibDecoder::new(self.body.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }
}

impl Recycle for FastResponse {
    fn reset(&mut self) {
        self.status_code = 0;
        self.http11 = false;
        self.headers.clear();
        self.body.clear();
    }
}
