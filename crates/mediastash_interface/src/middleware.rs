//! Backend trait and the middleware chain.

use crate::{Operation, OperationResult};
use async_trait::async_trait;
use mediastash_error::MediaStashResult;
use std::sync::Arc;

/// Executes operations against persisted state.
///
/// This is the end of every middleware chain.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Execute one operation.
    async fn execute(&self, operation: Operation) -> MediaStashResult<OperationResult>;
}

/// One link in the chain of operation interceptors.
///
/// Implementations receive every operation issued through a
/// [`StorageManager`](crate::StorageManager) and decide whether to rewrite it,
/// forward it through [`Next::run`], or rewrite what comes back.
#[async_trait]
pub trait StorageMiddleware: Send + Sync {
    /// Handle an operation, delegating to the rest of the chain via `next`.
    async fn process(
        &self,
        operation: Operation,
        next: Next<'_>,
    ) -> MediaStashResult<OperationResult>;
}

/// The remainder of a middleware chain.
///
/// Running it hands the operation to the next middleware, or to the backend
/// once the chain is exhausted.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middleware: &'a [Arc<dyn StorageMiddleware>],
    backend: &'a dyn StorageBackend,
}

impl<'a> Next<'a> {
    /// Build a chain over `middleware`, ending at `backend`.
    pub fn new(middleware: &'a [Arc<dyn StorageMiddleware>], backend: &'a dyn StorageBackend) -> Self {
        Self {
            middleware,
            backend,
        }
    }

    /// Forward an operation down the chain.
    pub async fn run(self, operation: Operation) -> MediaStashResult<OperationResult> {
        match self.middleware.split_first() {
            Some((head, rest)) => {
                head.process(operation, Next::new(rest, self.backend))
                    .await
            }
            None => self.backend.execute(operation).await,
        }
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.middleware.len())
            .finish()
    }
}
