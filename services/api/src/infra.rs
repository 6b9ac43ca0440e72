use metrics_exporter_prometheus::PrometheusHandle;
use padel_match::catalog::{CatalogError, RacketCatalog, SubstringMatcher};
use padel_match::config::{ProfilerConfig, StorageConfig};
use padel_match::identify::{GearIdentifier, LlmVisionProvider};
use padel_match::llm::OpenAiCompatibleProvider;
use padel_match::profile::{
    AttributeProfiler, DisabledProfiler, JsonFileProfileStore, LlmAttributeProfiler,
    PlayerProfile, ProfileStore, SessionId, StoreError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    profiles: Arc<Mutex<HashMap<SessionId, PlayerProfile>>>,
}

impl ProfileStore for InMemoryProfileStore {
    fn save(&self, session: &SessionId, profile: PlayerProfile) -> Result<(), StoreError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(session.clone(), profile);
        Ok(())
    }

    fn fetch(&self, session: &SessionId) -> Result<Option<PlayerProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(session).cloned())
    }

    fn clear(&self, session: &SessionId) -> Result<bool, StoreError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.remove(session).is_some())
    }
}

/// Profile storage chosen at startup.
pub(crate) enum ProfileBackend {
    Memory(InMemoryProfileStore),
    Files(JsonFileProfileStore),
}

impl ProfileBackend {
    pub(crate) fn from_config(storage: &StorageConfig) -> Result<Self, StoreError> {
        match &storage.profile_dir {
            Some(dir) => {
                let store = JsonFileProfileStore::open(dir)?;
                info!(dir = %store.root().display(), "persisting profiles to disk");
                Ok(Self::Files(store))
            }
            None => Ok(Self::Memory(InMemoryProfileStore::default())),
        }
    }
}

impl ProfileStore for ProfileBackend {
    fn save(&self, session: &SessionId, profile: PlayerProfile) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(session, profile),
            Self::Files(store) => store.save(session, profile),
        }
    }

    fn fetch(&self, session: &SessionId) -> Result<Option<PlayerProfile>, StoreError> {
        match self {
            Self::Memory(store) => store.fetch(session),
            Self::Files(store) => store.fetch(session),
        }
    }

    fn clear(&self, session: &SessionId) -> Result<bool, StoreError> {
        match self {
            Self::Memory(store) => store.clear(session),
            Self::Files(store) => store.clear(session),
        }
    }
}

pub(crate) fn load_catalog(storage: &StorageConfig) -> Result<RacketCatalog, CatalogError> {
    match &storage.catalog_path {
        Some(path) => RacketCatalog::from_path(path),
        None => RacketCatalog::embedded(),
    }
}

fn provider(config: &ProfilerConfig) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(&config.base_url, &config.model, config.api_key.clone())
}

pub(crate) fn build_profiler(config: &ProfilerConfig) -> Arc<dyn AttributeProfiler> {
    if !config.is_enabled() {
        info!("AI profiler disabled, profiles will use fallback targets");
        return Arc::new(DisabledProfiler);
    }

    Arc::new(LlmAttributeProfiler::new(
        provider(config),
        config.completion_options(),
        config.language.clone(),
    ))
}

pub(crate) fn build_identifier(config: &ProfilerConfig) -> Option<GearIdentifier> {
    if !config.is_enabled() {
        return None;
    }

    let vision = LlmVisionProvider::new(
        provider(config),
        config.completion_options(),
        config.language.clone(),
    );
    Some(GearIdentifier::new(
        Arc::new(vision),
        Arc::new(SubstringMatcher),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_match::config::DEFAULT_AI_BASE_URL;

    fn offline_config() -> ProfilerConfig {
        ProfilerConfig {
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 30,
            language: "es".to_string(),
        }
    }

    #[test]
    fn identifier_requires_configured_backend() {
        assert!(build_identifier(&offline_config()).is_none());

        let mut local = offline_config();
        local.base_url = "http://localhost:11434/v1".to_string();
        assert!(build_identifier(&local).is_some());
    }

    #[test]
    fn memory_backend_is_the_default() {
        let backend =
            ProfileBackend::from_config(&StorageConfig::default()).expect("memory backend");
        assert!(matches!(backend, ProfileBackend::Memory(_)));

        let session = SessionId("s-1".to_string());
        assert!(backend.fetch(&session).expect("fetch").is_none());
        assert!(!backend.clear(&session).expect("clear"));
    }

    #[test]
    fn embedded_catalog_is_used_without_path() {
        let catalog = load_catalog(&StorageConfig::default()).expect("catalog loads");
        assert!(!catalog.is_empty());
    }
}
