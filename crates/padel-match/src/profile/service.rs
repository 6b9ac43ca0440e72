use std::sync::Arc;

use tracing::info;

use super::capture::{validate_answers, ProfileValidationError};
use super::domain::{PlayerProfile, QuizAnswers, SessionId};
use super::profiler::{infer_or_fallback, AttributeProfiler};
use super::repository::{ProfileStore, StoreError};

/// Service composing answer validation, attribute inference, and storage.
pub struct ProfileService<S> {
    store: Arc<S>,
    profiler: Arc<dyn AttributeProfiler>,
}

impl<S> ProfileService<S>
where
    S: ProfileStore + 'static,
{
    pub fn new(store: Arc<S>, profiler: Arc<dyn AttributeProfiler>) -> Self {
        Self { store, profiler }
    }

    /// Validate the answers, infer targets, and replace the session profile.
    ///
    /// Profiler failures never reach the caller; the stored profile then
    /// carries the fallback targets. The store is written only after inference
    /// resolves, so dropping this future leaves the previous profile intact.
    pub async fn submit(
        &self,
        session: &SessionId,
        answers: QuizAnswers,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        let answers = validate_answers(answers)?;
        let inference = infer_or_fallback(self.profiler.as_ref(), &answers).await;
        let fallback = inference.is_fallback();

        let profile = PlayerProfile::new(answers, inference.targets, inference.analysis);
        self.store.save(session, profile.clone())?;

        info!(%session, fallback, "player profile finalized");
        Ok(profile)
    }

    /// Current profile for the session, read from the store on every call.
    pub fn get(&self, session: &SessionId) -> Result<Option<PlayerProfile>, ProfileServiceError> {
        Ok(self.store.fetch(session)?)
    }

    pub fn clear(&self, session: &SessionId) -> Result<bool, ProfileServiceError> {
        let removed = self.store.clear(session)?;
        if removed {
            info!(%session, "player profile cleared");
        }
        Ok(removed)
    }
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error(transparent)]
    Validation(#[from] ProfileValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
