//! Small helpers shared by both translation directions.

use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes};
use http::StatusCode;
use http_body::{Body, Frame, SizeHint};

/// Format a status line as `"<code> <reason>"`.
///
/// Unknown codes produce an empty reason, leaving a trailing space.
pub fn status_text(code: u16) -> String {
    let reason = StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("");
    format!("{} {}", code, reason)
}

/// Lower-case `haystack` and look for `needle`.
///
/// `needle` is expected to be lower-case already.
pub fn contains_ignore_case(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    if haystack.len() < needle.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.iter().map(u8::to_ascii_lowercase).eq(needle.iter().copied()))
}

/// Wrap an in-memory buffer as a response body.
pub fn body_from_bytes(bytes: impl Into<Bytes>) -> ResponseBody {
    ResponseBody { inner: bytes.into() }
}

/// Single-read body over an in-memory buffer.
///
/// Reading (through [`Read`] or as an [`http_body::Body`]) consumes the
/// bytes; there is no way to rewind. Dropping it is the close operation.
#[derive(Debug, Default)]
pub struct ResponseBody {
    inner: Bytes,
}

impl ResponseBody {
    /// Bytes not yet consumed.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Take the remaining bytes.
    pub fn into_bytes(self) -> Bytes {
        self.inner
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.inner.len());
        buf[..n].copy_from_slice(&self.inner[..n]);
        self.inner.advance(n);
        Ok(n)
    }
}

impl Body for ResponseBody {
    type Data = Bytes;
    type Error = std::convert::Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.inner.is_empty() {
            return Poll::Ready(None);
        }
        let data = std::mem::take(&mut this.inner);
        Poll::Ready(Some(Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.inner.len() as u64)
    }
}
