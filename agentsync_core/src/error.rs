use std::error::Error as StdError;

/// Common error type for `agentsync_core`.
///
/// Transport-level failures (reqwest, I/O) should preserve the underlying
/// error chain via `Error::backend`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing configuration: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Non-success HTTP response from the CRM or the feed.
    #[error("{path} {status}: {body}")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    #[error("backend error: {context}")]
    Backend {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    #[error("backend error: {0}")]
    BackendMessage(String),
}

impl Error {
    #[tracing::instrument(level = "debug", name = "agentsync.error.backend", skip(source))]
    pub fn backend(
        context: impl Into<String> + std::fmt::Debug,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Convenience: wrap any error into `Backend` with "reqwest" context.
    pub fn backend_reqwest(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend {
            context: "reqwest".into(),
            source: Box::new(source),
        }
    }

    pub fn http(path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            path: path.into(),
            status,
            body: body.into(),
        }
    }

    /// True for failures worth a bounded retry: server-side HTTP errors.
    ///
    /// Client errors (4xx) indicate a definitional or configuration problem
    /// and are never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Http { status, .. } if *status >= 500)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_path_status_body() {
        let e = Error::http("/crm/v3/objects/2-999/search", 403, "forbidden");
        assert_eq!(
            e.to_string(),
            "/crm/v3/objects/2-999/search 403: forbidden"
        );
    }

    #[test]
    fn only_server_errors_are_transient() {
        assert!(Error::http("/x", 500, "").is_transient());
        assert!(Error::http("/x", 503, "").is_transient());
        assert!(!Error::http("/x", 404, "").is_transient());
        assert!(!Error::http("/x", 429, "").is_transient());
        assert!(!Error::Config("HUBSPOT_TOKEN".to_string()).is_transient());
    }
}
