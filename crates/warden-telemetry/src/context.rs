//! Task-local request scope.
//!
//! The HTTP layer enters a scope per request; code further down (the
//! authorizer, gateway adapters) reads it to tag log events without taking
//! the request id as a parameter.

use std::future::Future;
use std::sync::Arc;

tokio::task_local! {
    static REQUEST_SCOPE: RequestScope;
}

/// Identifiers of the request currently being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestScope {
    request_id: Arc<str>,
    route: Arc<str>,
}

impl RequestScope {
    /// Scope for `request_id` served by `route`.
    #[must_use]
    pub fn new(request_id: &str, route: &str) -> Self {
        Self {
            request_id: Arc::from(request_id),
            route: Arc::from(route),
        }
    }

    /// Value of the `x-request-id` header; may be empty.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Matched route template, or the raw path when nothing matched.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Scope of the calling task, if it runs inside [`RequestScope::run`].
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_SCOPE.try_with(Clone::clone).ok()
    }

    /// Drive `fut` with this scope installed.
    pub async fn run<F>(self, fut: F) -> F::Output
    where
        F: Future + Send,
    {
        REQUEST_SCOPE.scope(self, fut).await
    }
}
