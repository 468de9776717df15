//! Outgoing request in the transport's own representation.

use crate::fast::pool::Recycle;

/// Mutable, reusable request description handed to a [`FastTransport`].
///
/// [`FastTransport`]: crate::transport::FastTransport
#[derive(Debug, Default)]
pub struct FastRequest {
    host: String,
    request_uri: String,
    method: String,
    user_agent: String,
    content_type: Option<String>,
    headers: Vec<(String, Vec<u8>)>,
    body: Vec<u8>,
}

impl FastRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_host(&mut self, host: &str) {
        replace(&mut self.host, host);
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_request_uri(&mut self, uri: &str) {
        replace(&mut self.request_uri, uri);
    }

    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn set_method(&mut self, method: &str) {
        replace(&mut self.method, method);
    }

    /// Request method, `GET` when never set.
    pub fn method(&self) -> &str {
        if self.method.is_empty() {
            "GET"
        } else {
            &self.method
        }
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        replace(&mut self.user_agent, user_agent);
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Set a header, replacing any existing value for the same name.
    ///
    /// `Content-Type` and `User-Agent` go to their dedicated fields. Framing
    /// headers are dropped: the length is always taken from the body.
    pub fn set_header(&mut self, name: &str, value: &[u8]) {
        if name.eq_ignore_ascii_case("content-type") {
            self.set_content_type(&String::from_utf8_lossy(value));
            return;
        }
        if name.eq_ignore_ascii_case("user-agent") {
            self.set_user_agent(&String::from_utf8_lossy(value));
            return;
        }
        if name.eq_ignore_ascii_case("content-length")
            || name.eq_ignore_ascii_case("transfer-encoding")
        {
            return;
        }

        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => {
                existing.clear();
                existing.extend_from_slice(value);
            }
            None => self.headers.push((name.to_string(), value.to_vec())),
        }
    }

    /// Value of a generic header (case-insensitive lookup).
    pub fn peek_header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_slice())
    }

    /// Generic headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_slice()))
    }

    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

impl Recycle for FastRequest {
    fn reset(&mut self) {
        self.host.clear();
        self.request_uri.clear();
        self.method.clear();
        self.user_agent.clear();
        self.content_type = None;
        self.headers.clear();
        self.body.clear();
    }
}

fn replace(slot: &mut String, value: &str) {
    slot.clear();
    slot.push_str(value);
}
