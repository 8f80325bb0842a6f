//! Fan one request out to many models and gather the results in order.

use std::sync::Arc;

use arena_llm::{CompletionRequest, CompletionResult, Error};
use arena_registry::Registry;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::outcome::DispatchOutcome;

/// Dispatches completions across the adapters of a [`Registry`].
///
/// Every resolved model runs in its own task, so one slow or failing model
/// never holds back or cancels its siblings. Results always come back as one
/// outcome per requested id, in request order.
#[derive(Clone)]
pub struct Comparator {
    registry: Arc<Registry>,
    limit: Option<Arc<Semaphore>>,
}

impl Comparator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            limit: None,
        }
    }

    /// Cap the number of completions in flight at once. `0` means unbounded.
    pub fn with_concurrency_limit(mut self, max_in_flight: usize) -> Self {
        self.limit = (max_in_flight > 0).then(|| Arc::new(Semaphore::new(max_in_flight)));
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Send `request` to every model in `model_ids` concurrently.
    ///
    /// Fails as a whole only for bad input: an empty id list or a request
    /// that does not validate. Everything else, unknown ids included, is
    /// reported per model.
    pub async fn compare(
        &self,
        model_ids: &[String],
        request: CompletionRequest,
    ) -> Result<Vec<DispatchOutcome<CompletionResult>>, Error> {
        if model_ids.is_empty() {
            return Err(Error::Validation("at least one model id is required".into()));
        }
        request.validate()?;

        let span = tracing::info_span!("compare", models = model_ids.len());
        async {
            let request = Arc::new(request);
            let pending = model_ids
                .iter()
                .map(|id| self.spawn(id, id, Arc::clone(&request)))
                .collect();
            let outcomes = settle(pending).await;

            let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
            tracing::info!(
                succeeded = outcomes.len() - failed,
                failed,
                "comparison finished"
            );
            Ok(outcomes)
        }
        .instrument(span)
        .await
    }

    /// Resolve `model_id` and start its completion. The outcome is reported
    /// under `slot_id`, which differs from `model_id` when a judge model
    /// answers on behalf of a target.
    pub(crate) fn spawn(
        &self,
        slot_id: &str,
        model_id: &str,
        request: Arc<CompletionRequest>,
    ) -> Pending {
        let Some(resolved) = self.registry.find_model(model_id) else {
            tracing::debug!(model = model_id, "model not in any catalog");
            return Pending::Ready(DispatchOutcome::failure(
                slot_id,
                Error::ModelNotFound(model_id.to_string()),
            ));
        };

        let adapter = Arc::clone(resolved.adapter);
        let limit = self.limit.clone();
        let model = model_id.to_string();
        let span = tracing::debug_span!("dispatch", provider = resolved.provider, model = model_id);
        let handle = tokio::spawn(
            async move {
                // The semaphore is never closed, so acquiring only fails if it
                // is dropped, in which case running unthrottled is fine.
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                adapter.complete(&model, &request).await
            }
            .instrument(span),
        );

        Pending::Running {
            slot_id: slot_id.to_string(),
            handle,
        }
    }
}

/// A slot whose result is either already known or still being computed.
pub(crate) enum Pending {
    Ready(DispatchOutcome<CompletionResult>),
    Running {
        slot_id: String,
        handle: JoinHandle<Result<CompletionResult, Error>>,
    },
}

impl Pending {
    async fn settle(self) -> DispatchOutcome<CompletionResult> {
        match self {
            Pending::Ready(outcome) => outcome,
            Pending::Running { slot_id, handle } => match handle.await {
                Ok(Ok(result)) => DispatchOutcome::success(slot_id, result),
                Ok(Err(err)) => DispatchOutcome::failure(slot_id, err),
                Err(join) => {
                    tracing::error!(slot = %slot_id, error = %join, "dispatch task did not complete");
                    DispatchOutcome::failure(
                        slot_id,
                        Error::Internal(format!("dispatch task failed: {join}")),
                    )
                }
            },
        }
    }
}

/// Wait for every slot. Order is preserved.
pub(crate) async fn settle(pending: Vec<Pending>) -> Vec<DispatchOutcome<CompletionResult>> {
    join_all(pending.into_iter().map(Pending::settle)).await
}
