//! Standard request → fast request.
//!
//! Only the first value of each header name is forwarded. Bodies are
//! buffered for a fixed set of textual content types; multipart form
//! bodies are not translated and the request goes out without a body.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, USER_AGENT};
use http::Request;
use http_body::Body;
use http_body_util::{BodyExt, Limited};

use crate::fast::FastRequest;
use crate::target::Target;

/// Error bound accepted from standard request bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Content types whose body is copied verbatim into the fast request.
const BUFFERED_CONTENT_TYPES: [&str; 4] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "text/html",
    "text/plain",
];

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Fill `fast` from `request`, draining the request body when it is buffered.
///
/// No network I/O happens here. A body that cannot be read, or that is
/// larger than `max_body_bytes` when a cap is given, is sent empty.
pub async fn translate_request<B>(
    target: &Target,
    request: Request<B>,
    fast: &mut FastRequest,
    max_body_bytes: Option<usize>,
) where
    B: Body,
    B::Error: Into<BoxError>,
{
    let url = target.url();
    fast.set_host(&target.host);
    fast.set_request_uri(&url);

    let (parts, body) = request.into_parts();
    let mut body = Some(body);

    for name in parts.headers.keys() {
        // Host comes from the target.
        if name == HOST {
            continue;
        }
        let Some(value) = parts.headers.get(name) else {
            continue;
        };

        if name == CONTENT_TYPE {
            let content_type = String::from_utf8_lossy(value.as_bytes());
            fast.set_content_type(&content_type);

            if BUFFERED_CONTENT_TYPES.contains(&&*content_type) {
                if let Some(body) = body.take() {
                    let bytes = drain_body(body, max_body_bytes).await;
                    fast.set_body(&bytes);
                }
            } else if content_type == MULTIPART_FORM_DATA {
                tracing::debug!(uri = %url, "multipart/form-data body is not forwarded");
            }
            continue;
        }

        fast.set_header(name.as_str(), value.as_bytes());
    }

    fast.set_header("Accept-Encoding", b"gzip");
    fast.set_method(parts.method.as_str());

    let user_agent = parts
        .headers
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    fast.set_user_agent(&user_agent);

    tracing::debug!(
        method = %fast.method(),
        uri = %fast.request_uri(),
        body_len = fast.body().len(),
        "Translated request"
    );
}

async fn drain_body<B>(body: B, limit: Option<usize>) -> Bytes
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let collected = match limit {
        Some(limit) => Limited::new(body, limit).collect().await,
        None => body.collect().await.map_err(Into::into),
    };

    match collected {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer request body, sending it empty");
            Bytes::new()
        }
    }
}
