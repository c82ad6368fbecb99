//! Provider switching
//!
//! Every operation starts from a fresh `load()`, derives the provider state,
//! and performs at most one `save()`. Concurrent invocations are not
//! coordinated: the last writer wins.

use crate::error::Result;
use crate::provider::{alternate_env, ModelOverrides, ProviderKind, ProviderState};
use crate::secrets::{read_secret, SECRET_KEY};
use crate::settings::SettingsStore;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Snapshot of the settings document for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub state: ProviderState,
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Only filled in when the alternate provider is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelOverrides>,
    pub env: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Requested provider was already active; nothing written
    AlreadyActive(ProviderKind),
    Switched { from: ProviderState, to: ProviderKind },
}

impl SwitchOutcome {
    pub fn target(&self) -> ProviderKind {
        match self {
            SwitchOutcome::AlreadyActive(kind) => *kind,
            SwitchOutcome::Switched { to, .. } => *to,
        }
    }
}

pub struct Switcher<S: SettingsStore> {
    store: S,
    secrets_path: PathBuf,
}

impl<S: SettingsStore> Switcher<S> {
    pub fn new(store: S, secrets_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            secrets_path: secrets_path.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derive the active provider from the settings document
    pub fn inspect(&self) -> Result<ProviderState> {
        let state = self.store.load()?.state();
        log::debug!("Derived provider state {:?} from {}", state, self.store.location());
        Ok(state)
    }

    pub fn status(&self) -> Result<StatusReport> {
        let doc = self.store.load()?;
        let state = doc.state();

        Ok(StatusReport {
            state,
            base_url: doc.base_url().map(str::to_string),
            models: (state == ProviderState::Alternate).then(|| doc.model_overrides()),
            env: doc.env().cloned(),
        })
    }

    /// Activate `target`. A no-op when it is already active.
    pub fn switch_to(&self, target: ProviderKind) -> Result<SwitchOutcome> {
        let mut doc = self.store.load()?;
        let current = doc.state();

        if current.kind() == Some(target) {
            // The default provider means no `env` key at all, not an empty one
            if target == ProviderKind::Default && doc.has_vacant_env() {
                doc.remove_env();
                self.store.save(&doc)?;
                log::info!("Dropped empty env block from {}", self.store.location());
            } else {
                log::info!("{} already active, leaving {} untouched", target, self.store.location());
            }
            return Ok(SwitchOutcome::AlreadyActive(target));
        }

        match target {
            ProviderKind::Alternate => {
                // Read the token before touching anything
                let token = read_secret(&self.secrets_path, SECRET_KEY)?;
                doc.replace_env(alternate_env(&token));
            }
            ProviderKind::Default => {
                doc.remove_env();
            }
        }

        self.store.save(&doc)?;
        log::info!(
            "Switched {} from {:?} to {}",
            self.store.location(),
            current,
            target
        );

        Ok(SwitchOutcome::Switched {
            from: current,
            to: target,
        })
    }

    /// Switch to whichever provider is not active; Unknown goes to default
    pub fn toggle(&self) -> Result<SwitchOutcome> {
        let target = self.inspect()?.toggle_target();
        self.switch_to(target)
    }
}
