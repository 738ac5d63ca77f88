use std::fmt;

/// HTTP methods the search API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Everything a single logical API call carries through the dispatch
/// pipeline. Built fresh per call; the retry marker travels on this value
/// rather than on shared client state, so concurrent calls cannot observe
/// each other's recovery attempts.
#[derive(Debug, Clone)]
pub struct RequestContext {
    resource_path: String,
    method: HttpMethod,
    body: Option<String>,
    retry_attempt: bool,
}

impl RequestContext {
    pub fn get(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            method: HttpMethod::Get,
            body: None,
            retry_attempt: false,
        }
    }

    pub fn post(resource_path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            method: HttpMethod::Post,
            body: Some(body.into()),
            retry_attempt: false,
        }
    }

    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn is_retry_attempt(&self) -> bool {
        self.retry_attempt
    }

    /// Marks the one allowed recovery attempt. Consumes the context so a
    /// logical call can only ever transition into the retry state once.
    pub(crate) fn into_retry(mut self) -> Self {
        self.retry_attempt = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_context_has_no_body_and_no_retry_marker() {
        let ctx = RequestContext::get("/search/v1/products/ABC-123");
        assert_eq!(ctx.method(), HttpMethod::Get);
        assert_eq!(ctx.resource_path(), "/search/v1/products/ABC-123");
        assert!(ctx.body().is_none());
        assert!(!ctx.is_retry_attempt());
    }

    #[test]
    fn post_context_carries_body() {
        let ctx = RequestContext::post("/search/v1/products/keyword", r#"{"keywords":"relay"}"#);
        assert_eq!(ctx.method(), HttpMethod::Post);
        assert_eq!(ctx.body(), Some(r#"{"keywords":"relay"}"#));
    }

    #[test]
    fn into_retry_preserves_everything_but_the_marker() {
        let ctx = RequestContext::post("/search/v1/products/keyword", "{}").into_retry();
        assert!(ctx.is_retry_attempt());
        assert_eq!(ctx.resource_path(), "/search/v1/products/keyword");
        assert_eq!(ctx.body(), Some("{}"));
    }
}
