use axum::http::Uri;
use uuid::Uuid;

/// Per-request context attached by the middleware.
///
/// `info` identifies the request line for error envelopes. It carries the
/// request path only, never header or body contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
    info: String,
}

impl RequestContext {
    pub fn new(uri: &Uri) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            info: format!("uri={}", uri.path()),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn info(&self) -> &str {
        &self.info
    }
}
