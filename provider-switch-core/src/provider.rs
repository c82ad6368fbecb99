//! Provider types for provider-switch
//!
//! The active provider is never stored; it is derived from the settings
//! document's `env.ANTHROPIC_BASE_URL` value.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

pub const ENV_AUTH_TOKEN: &str = "ANTHROPIC_AUTH_TOKEN";
pub const ENV_BASE_URL: &str = "ANTHROPIC_BASE_URL";
pub const ENV_HAIKU_MODEL: &str = "ANTHROPIC_DEFAULT_HAIKU_MODEL";
pub const ENV_SONNET_MODEL: &str = "ANTHROPIC_DEFAULT_SONNET_MODEL";
pub const ENV_OPUS_MODEL: &str = "ANTHROPIC_DEFAULT_OPUS_MODEL";
pub const ENV_TIMEOUT_MS: &str = "API_TIMEOUT_MS";

/// Domain fragment identifying the default provider
pub const DEFAULT_MARKER: &str = "api.anthropic.com";
/// Domain fragment identifying the alternate provider
pub const ALTERNATE_MARKER: &str = "api.z.ai";

pub const ALTERNATE_BASE_URL: &str = "https://api.z.ai/api/anthropic";
pub const ALTERNATE_HAIKU_MODEL: &str = "glm-4.6";
pub const ALTERNATE_SONNET_MODEL: &str = "glm-4.6";
pub const ALTERNATE_OPUS_MODEL: &str = "glm-4.6";
pub const ALTERNATE_TIMEOUT_MS: &str = "3000000";

/// A provider that can be switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    Default,
    Alternate,
}

impl ProviderKind {
    pub const DEFAULT_NAMES: [&'static str; 4] = ["default-provider", "default", "anthropic", "claude"];
    pub const ALTERNATE_NAMES: [&'static str; 4] = ["alternate-provider", "alternate", "zai", "glm"];

    /// Canonical command name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Default => "default-provider",
            ProviderKind::Alternate => "alternate-provider",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Default => "Default provider (Anthropic)",
            ProviderKind::Alternate => "Alternate provider (Z.AI)",
        }
    }

    /// Case-sensitive, literal match against the known names and aliases
    pub fn parse(s: &str) -> Option<Self> {
        if Self::DEFAULT_NAMES.contains(&s) {
            Some(ProviderKind::Default)
        } else if Self::ALTERNATE_NAMES.contains(&s) {
            Some(ProviderKind::Alternate)
        } else {
            None
        }
    }

    pub fn other(&self) -> Self {
        match self {
            ProviderKind::Default => ProviderKind::Alternate,
            ProviderKind::Alternate => ProviderKind::Default,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider state derived from the settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderState {
    Default,
    Alternate,
    Unknown,
}

impl ProviderState {
    pub fn kind(&self) -> Option<ProviderKind> {
        match self {
            ProviderState::Default => Some(ProviderKind::Default),
            ProviderState::Alternate => Some(ProviderKind::Alternate),
            ProviderState::Unknown => None,
        }
    }

    /// Where a bare toggle goes from here. Unknown falls back to the default provider.
    pub fn toggle_target(&self) -> ProviderKind {
        match self {
            ProviderState::Alternate => ProviderKind::Default,
            ProviderState::Default => ProviderKind::Alternate,
            ProviderState::Unknown => ProviderKind::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.label(),
            None => "Unknown",
        }
    }
}

impl From<ProviderKind> for ProviderState {
    fn from(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Default => ProviderState::Default,
            ProviderKind::Alternate => ProviderState::Alternate,
        }
    }
}

/// Classify a base URL value. Total: every input maps to a state.
///
/// The value is trimmed first, so a whitespace-only URL counts as empty.
pub fn classify(base_url: Option<&str>) -> ProviderState {
    let url = base_url.unwrap_or("").trim();

    if url.contains(ALTERNATE_MARKER) {
        ProviderState::Alternate
    } else if url.is_empty() || url == "null" || url.contains(DEFAULT_MARKER) {
        ProviderState::Default
    } else {
        ProviderState::Unknown
    }
}

/// The complete `env` block written when activating the alternate provider.
///
/// Replaces any existing `env` mapping; nothing from the previous block survives.
pub fn alternate_env(token: &str) -> IndexMap<String, String> {
    let mut env = IndexMap::new();
    env.insert(ENV_AUTH_TOKEN.to_string(), token.to_string());
    env.insert(ENV_BASE_URL.to_string(), ALTERNATE_BASE_URL.to_string());
    env.insert(ENV_HAIKU_MODEL.to_string(), ALTERNATE_HAIKU_MODEL.to_string());
    env.insert(ENV_SONNET_MODEL.to_string(), ALTERNATE_SONNET_MODEL.to_string());
    env.insert(ENV_OPUS_MODEL.to_string(), ALTERNATE_OPUS_MODEL.to_string());
    env.insert(ENV_TIMEOUT_MS.to_string(), ALTERNATE_TIMEOUT_MS.to_string());
    env
}

/// Model tier overrides surfaced by `status` when the alternate provider is active
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub haiku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sonnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opus: Option<String>,
    #[serde(rename = "timeoutMs", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(ProviderKind::parse("default-provider"), Some(ProviderKind::Default));
        assert_eq!(ProviderKind::parse("glm"), Some(ProviderKind::Alternate));
        assert_eq!(ProviderKind::parse("GLM"), None);
        assert_eq!(ProviderKind::parse("Default"), None);
        assert_eq!(ProviderKind::parse(" default"), None);
    }

    #[test]
    fn test_other_and_state_round_trip() {
        for kind in [ProviderKind::Default, ProviderKind::Alternate] {
            assert_ne!(kind.other(), kind);
            assert_eq!(ProviderState::from(kind).kind(), Some(kind));
            assert_eq!(ProviderState::from(kind).toggle_target(), kind.other());
        }
        assert_eq!(ProviderState::Unknown.kind(), None);
    }

    #[test]
    fn test_alternate_env_has_all_fields() {
        let env = alternate_env("abc123");
        let keys: Vec<&str> = env.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                ENV_AUTH_TOKEN,
                ENV_BASE_URL,
                ENV_HAIKU_MODEL,
                ENV_SONNET_MODEL,
                ENV_OPUS_MODEL,
                ENV_TIMEOUT_MS
            ]
        );
        assert_eq!(env[ENV_AUTH_TOKEN], "abc123");
        assert_eq!(classify(env.get(ENV_BASE_URL).map(String::as_str)), ProviderState::Alternate);
    }
}
