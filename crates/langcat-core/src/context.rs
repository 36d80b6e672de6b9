//! Query Context: per-request trace id, cancellation and deadline
use crate::error::CatalogError;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct QueryContext {
    pub trace_id: String,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut ctx = Self::new();
        ctx.deadline = Some(Instant::now() + timeout);
        ctx
    }

    /// Context tied to an existing token, e.g. one the transport cancels.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail with `Cancelled` if the request was aborted before `stage`.
    pub fn checkpoint(&self, stage: &str) -> Result<(), CatalogError> {
        if self.is_cancelled() {
            tracing::debug!(trace_id = %self.trace_id, stage, "query aborted");
            return Err(CatalogError::Cancelled(format!(
                "aborted before {} (trace {})",
                stage, self.trace_id
            )));
        }
        Ok(())
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_passes() {
        let ctx = QueryContext::new();
        assert!(!ctx.is_cancelled());
        assert!(ctx.checkpoint("filter").is_ok());
    }

    #[test]
    fn test_cancel_trips_checkpoint() {
        let ctx = QueryContext::new();
        ctx.cancel();
        assert!(matches!(ctx.checkpoint("sort"), Err(CatalogError::Cancelled(_))));
    }

    #[test]
    fn test_elapsed_deadline_trips_checkpoint() {
        let ctx = QueryContext::with_timeout(Duration::ZERO);
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_shared_token() {
        let token = CancellationToken::new();
        let ctx = QueryContext::new().with_token(token.clone());
        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
