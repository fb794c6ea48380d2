//! Persistent key-value settings: credentials and the freelancer profile.
//!
//! The storage capability is decided once at startup and injected as a
//! `SettingsStore` trait object; no component re-detects its environment
//! per call.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::models::settings::{FreelancerProfile, Provider, ProviderConfig};

/// Canonical storage keys. The `openai*` pair is deprecated; it is only
/// consulted by the one-shot migration at startup.
pub mod keys {
    pub const API_KEY: &str = "apiKey";
    pub const AI_PROVIDER: &str = "aiProvider";
    pub const MODEL: &str = "model";
    pub const EXPERIENCE: &str = "freelancerExperience";
    pub const SPECIALTY: &str = "freelancerSpecialty";
    pub const ACHIEVEMENTS: &str = "freelancerAchievements";
    pub const CUSTOM_INSTRUCTIONS: &str = "freelancerCustomInstructions";

    pub const LEGACY_API_KEY: &str = "openaiApiKey";
    pub const LEGACY_MODEL: &str = "openaiModel";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Eventually-consistent key-value storage. Writes are last-write-wins
/// with no transactional grouping across keys.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError>;
}

/// Normalizes deprecated `openaiApiKey`/`openaiModel` entries into the
/// canonical `apiKey`/`aiProvider`/`model` keys. Runs once at load; call
/// sites never consult legacy keys afterward. The legacy entries are left
/// in place for older clients. Returns true if anything was migrated.
pub async fn migrate_legacy_keys(store: &dyn SettingsStore) -> Result<bool, StoreError> {
    let canonical_key = store.get(keys::API_KEY).await?;
    if canonical_key.map_or(false, |k| !k.is_empty()) {
        return Ok(false);
    }

    let legacy_key = match store.get(keys::LEGACY_API_KEY).await? {
        Some(k) if !k.is_empty() => k,
        _ => return Ok(false),
    };

    let mut entries = vec![
        (keys::API_KEY.to_string(), legacy_key),
        (
            keys::AI_PROVIDER.to_string(),
            Provider::OpenAi.as_str().to_string(),
        ),
    ];
    if store.get(keys::MODEL).await?.is_none() {
        if let Some(model) = store.get(keys::LEGACY_MODEL).await? {
            entries.push((keys::MODEL.to_string(), model));
        }
    }
    store.set_many(entries).await?;
    info!("Migrated legacy OpenAI settings keys to canonical keys");
    Ok(true)
}

/// Reads and writes the user's API key, provider choice, and model.
#[derive(Clone)]
pub struct CredentialStore {
    inner: Arc<dyn SettingsStore>,
}

impl CredentialStore {
    pub fn new(inner: Arc<dyn SettingsStore>) -> Self {
        Self { inner }
    }

    /// Loads the provider configuration. The API key may be empty — the
    /// proposal client re-validates and fails fast on its own.
    pub async fn load(&self) -> Result<ProviderConfig, StoreError> {
        let provider = self
            .inner
            .get(keys::AI_PROVIDER)
            .await?
            .map(|s| Provider::from_str_or_default(&s))
            .unwrap_or_default();
        let api_key = self.inner.get(keys::API_KEY).await?.unwrap_or_default();
        let model = self
            .inner
            .get(keys::MODEL)
            .await?
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(ProviderConfig {
            provider,
            api_key,
            model,
        })
    }

    pub async fn save(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        self.inner
            .set_many(vec![
                (keys::API_KEY.to_string(), config.api_key.clone()),
                (
                    keys::AI_PROVIDER.to_string(),
                    config.provider.as_str().to_string(),
                ),
                (keys::MODEL.to_string(), config.model.clone()),
            ])
            .await
    }
}

/// Reads and writes the freelancer profile fields.
#[derive(Clone)]
pub struct ProfileStore {
    inner: Arc<dyn SettingsStore>,
}

impl ProfileStore {
    pub fn new(inner: Arc<dyn SettingsStore>) -> Self {
        Self { inner }
    }

    pub async fn load(&self) -> Result<FreelancerProfile, StoreError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Ok(FreelancerProfile {
            experience: self.inner.get(keys::EXPERIENCE).await?.unwrap_or_default(),
            specialty: self.inner.get(keys::SPECIALTY).await?.unwrap_or_default(),
            achievements: non_empty(self.inner.get(keys::ACHIEVEMENTS).await?),
            custom_instructions: non_empty(self.inner.get(keys::CUSTOM_INSTRUCTIONS).await?),
        })
    }

    pub async fn save(&self, profile: &FreelancerProfile) -> Result<(), StoreError> {
        self.inner
            .set_many(vec![
                (keys::EXPERIENCE.to_string(), profile.experience.clone()),
                (keys::SPECIALTY.to_string(), profile.specialty.clone()),
                (
                    keys::ACHIEVEMENTS.to_string(),
                    profile.achievements.clone().unwrap_or_default(),
                ),
                (
                    keys::CUSTOM_INSTRUCTIONS.to_string(),
                    profile.custom_instructions.clone().unwrap_or_default(),
                ),
            ])
            .await
    }
}
