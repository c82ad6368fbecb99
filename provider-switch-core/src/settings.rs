//! Settings document - the JSON file holding provider overrides
//!
//! Only the top-level `env` key is ever read or written. Every other key is
//! carried through untouched, in its original order.

use crate::config::atomic_write;
use crate::error::{CoreError, Result};
use crate::provider::{
    classify, ModelOverrides, ProviderState, ENV_BASE_URL, ENV_HAIKU_MODEL, ENV_OPUS_MODEL,
    ENV_SONNET_MODEL, ENV_TIMEOUT_MS,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const ENV_KEY: &str = "env";

/// In-memory settings document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
}

impl SettingsDocument {
    /// Parse document content; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| CoreError::InvalidSettings {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_value(value).ok_or_else(|| CoreError::InvalidSettings {
            path: path.to_path_buf(),
            reason: "top-level value must be a JSON object".to_string(),
        })
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The `env` mapping, if present and an object
    pub fn env(&self) -> Option<&Map<String, Value>> {
        self.root.get(ENV_KEY).and_then(Value::as_object)
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env()?.get(key)?.as_str()
    }

    /// `env.ANTHROPIC_BASE_URL`; non-string values read as absent
    pub fn base_url(&self) -> Option<&str> {
        self.env_var(ENV_BASE_URL)
    }

    pub fn state(&self) -> ProviderState {
        classify(self.base_url())
    }

    pub fn model_overrides(&self) -> ModelOverrides {
        let get = |key: &str| self.env_var(key).map(str::to_string);
        ModelOverrides {
            haiku: get(ENV_HAIKU_MODEL),
            sonnet: get(ENV_SONNET_MODEL),
            opus: get(ENV_OPUS_MODEL),
            timeout_ms: get(ENV_TIMEOUT_MS),
        }
    }

    /// Set `env` to exactly `env`, discarding whatever was there before
    pub fn replace_env(&mut self, env: IndexMap<String, String>) {
        let map: Map<String, Value> = env
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        self.root.insert(ENV_KEY.to_string(), Value::Object(map));
    }

    /// `env` key present but empty, null or not an object
    pub fn has_vacant_env(&self) -> bool {
        match self.root.get(ENV_KEY) {
            None => false,
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => true,
        }
    }

    /// Drop the `env` key entirely. Returns whether it was present.
    pub fn remove_env(&mut self) -> bool {
        self.root.shift_remove(ENV_KEY).is_some()
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }
}

/// Load/save seam for the settings document
pub trait SettingsStore {
    fn load(&self) -> Result<SettingsDocument>;

    fn save(&self, doc: &SettingsDocument) -> Result<()>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}

/// Settings document backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    /// Fails with `ConfigurationMissing` if the file does not exist. The
    /// document is created by other tooling, never by us.
    fn load(&self) -> Result<SettingsDocument> {
        if !self.path.exists() {
            return Err(CoreError::ConfigurationMissing(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        SettingsDocument::parse(&self.path, &content)
    }

    fn save(&self, doc: &SettingsDocument) -> Result<()> {
        let content = doc.to_pretty_string()?;
        atomic_write(&self.path, content.as_bytes())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Settings document held in memory (for testing and embedding)
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    doc: Mutex<Option<SettingsDocument>>,
    saves: AtomicUsize,
}

impl MemorySettingsStore {
    pub fn new(doc: SettingsDocument) -> Self {
        Self {
            doc: Mutex::new(Some(doc)),
            saves: AtomicUsize::new(0),
        }
    }

    /// A store whose document does not exist
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<SettingsDocument> {
        self.doc.lock().ok().and_then(|doc| doc.clone())
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<SettingsDocument> {
        let doc = self
            .doc
            .lock()
            .map_err(|e| CoreError::Message(format!("Mutex lock failed: {e}")))?;
        doc.clone()
            .ok_or_else(|| CoreError::ConfigurationMissing(PathBuf::from(self.location())))
    }

    fn save(&self, new_doc: &SettingsDocument) -> Result<()> {
        let mut doc = self
            .doc
            .lock()
            .map_err(|e| CoreError::Message(format!("Mutex lock failed: {e}")))?;
        *doc = Some(new_doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> SettingsDocument {
        SettingsDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = SettingsDocument::parse(Path::new("s.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings { .. }));

        let err = SettingsDocument::parse(Path::new("s.json"), "{ not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings { .. }));
    }

    #[test]
    fn test_base_url_non_string_reads_as_absent() {
        let d = doc(json!({"env": {"ANTHROPIC_BASE_URL": 42}}));
        assert_eq!(d.base_url(), None);
        assert_eq!(d.state(), ProviderState::Default);

        let d = doc(json!({"env": "not-a-map"}));
        assert!(d.env().is_none());
    }

    #[test]
    fn test_remove_env_keeps_sibling_order() {
        let mut d = doc(json!({"model": "opus", "env": {"A": "1"}, "permissions": {"allow": []}}));
        assert!(d.remove_env());
        let keys: Vec<&String> = d.as_map().keys().collect();
        assert_eq!(keys, ["model", "permissions"]);
        assert!(!d.remove_env());
    }

    #[test]
    fn test_replace_env_discards_previous_keys() {
        let mut d = doc(json!({"env": {"OLD": "x", "ANTHROPIC_BASE_URL": "https://old"}}));
        let mut env = IndexMap::new();
        env.insert("NEW".to_string(), "y".to_string());
        d.replace_env(env);

        assert_eq!(d.env().unwrap().len(), 1);
        assert_eq!(d.env_var("NEW"), Some("y"));
        assert_eq!(d.env_var("OLD"), None);
    }

    #[test]
    fn test_vacant_env() {
        assert!(!doc(json!({})).has_vacant_env());
        assert!(doc(json!({"env": {}})).has_vacant_env());
        assert!(doc(json!({"env": null})).has_vacant_env());
        assert!(!doc(json!({"env": {"A": "1"}})).has_vacant_env());
    }

    #[test]
    fn test_pretty_string_ends_with_newline() {
        let d = doc(json!({"a": 1}));
        assert_eq!(d.to_pretty_string().unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
