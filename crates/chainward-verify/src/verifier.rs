//! Verifier façade: locate, walk, judge.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::info;
use uuid::Uuid;

use chainward_store::ChainStore;
use chainward_types::{CancelToken, ChainwardError, Verdict};

use crate::judge::judge;
use crate::locator::locate;
use crate::walker::ChainWalk;

/// Per-run options: an optional walk timeout and an optional caller
/// cancellation token. Both are checked between walk steps; either one
/// firing yields [`Verdict::Incomplete`].
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl VerifyOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }
}

/// Verifies the tamper-evidence of hash-chained audit logs.
///
/// Holds nothing but the store handle; each run's working state (current
/// record, hop counter) lives inside that run and is discarded when it
/// ends. Independent chains can therefore be verified concurrently over
/// one `Verifier`.
pub struct Verifier {
    store: Arc<dyn ChainStore>,
}

impl Verifier {
    pub fn new(store: Arc<dyn ChainStore>) -> Self {
        Self { store }
    }

    /// Verify one chain with default options.
    pub async fn verify(&self, chain_key: &str) -> Result<Verdict, ChainwardError> {
        self.verify_with(chain_key, &VerifyOptions::default()).await
    }

    /// Verify one chain: locate its endpoints, walk it from genesis, and
    /// judge the walk against the endpoints.
    pub async fn verify_with(
        &self,
        chain_key: &str,
        options: &VerifyOptions,
    ) -> Result<Verdict, ChainwardError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, chain_key, "starting chain verification");

        let endpoints = locate(self.store.as_ref(), chain_key).await?;

        let mut walk = ChainWalk::new(self.store.as_ref(), endpoints.genesis.clone())
            .with_max_records(endpoints.total);
        if let Some(timeout) = options.timeout {
            walk = walk.with_deadline(Instant::now() + timeout);
        }
        if let Some(cancel) = &options.cancel {
            walk = walk.with_cancel_token(cancel.clone());
        }

        let outcome = walk.run().await?;
        let verdict = judge(endpoints.total, &endpoints.head, outcome);

        info!(%run_id, chain_key, %verdict, "chain verification finished");
        Ok(verdict)
    }

    /// Verify several chains concurrently.
    ///
    /// The runs share no mutable state; one chain failing (or erroring)
    /// never aborts the others. Results are returned in input order.
    pub async fn verify_many(
        &self,
        chain_keys: &[String],
        options: &VerifyOptions,
    ) -> Vec<(String, Result<Verdict, ChainwardError>)> {
        let runs = chain_keys.iter().map(|chain_key| async move {
            (
                chain_key.clone(),
                self.verify_with(chain_key, options).await,
            )
        });
        join_all(runs).await
    }
}
