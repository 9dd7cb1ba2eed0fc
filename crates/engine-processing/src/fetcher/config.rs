use engine_core::{
    state::{CursorStore, paths::StatePathResolver},
    time::corrector::TimestampCorrector,
};
use serde::Deserialize;
use std::sync::Arc;

/// What to do with a row whose timestamp cannot be corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionPolicy {
    /// Deliver the row with its raw, UTC-labelled timestamp.
    #[default]
    KeepRaw,
    /// Leave the row out of the batch. The cursor still moves past it.
    DropRow,
    /// Abort the cycle without touching the cursor.
    FailBatch,
}

/// Collaborators of a log fetcher.
#[derive(Clone)]
pub struct FetchContext {
    pub store: Arc<dyn CursorStore>,
    pub resolver: Arc<dyn StatePathResolver>,
    pub corrector: TimestampCorrector,
    pub policy: CorrectionPolicy,
}

impl FetchContext {
    pub fn new(
        store: Arc<dyn CursorStore>,
        resolver: Arc<dyn StatePathResolver>,
        corrector: TimestampCorrector,
    ) -> Self {
        Self {
            store,
            resolver,
            corrector,
            policy: CorrectionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CorrectionPolicy) -> Self {
        self.policy = policy;
        self
    }
}
