//! Provider Switch Core Library
//!
//! Derives which upstream API provider a Claude settings document points at
//! and rewrites its `env` block to activate the other one. Used by the
//! `switch-provider` CLI.

pub mod config;
pub mod error;
pub mod provider;
pub mod secrets;
pub mod settings;
pub mod switcher;

// Re-export commonly used types
pub use config::{
    atomic_write, get_global_settings_path, get_project_settings_path, get_secrets_path,
};
pub use error::CoreError;
pub use provider::{classify, ModelOverrides, ProviderKind, ProviderState};
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsDocument, SettingsStore};
pub use switcher::{StatusReport, SwitchOutcome, Switcher};
