pub mod provider;

use provider_switch_core::ProviderKind;

/// What a single invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Status,
    Toggle,
    Switch(ProviderKind),
}

impl Target {
    const STATUS_NAMES: [&'static str; 2] = ["status", "st"];

    /// `None` input toggles. Unrecognized input returns `None`.
    pub fn parse(arg: Option<&str>) -> Option<Self> {
        let Some(arg) = arg else {
            return Some(Target::Toggle);
        };

        if Self::STATUS_NAMES.contains(&arg) {
            Some(Target::Status)
        } else {
            ProviderKind::parse(arg).map(Target::Switch)
        }
    }

    pub fn choices() -> String {
        let group = |names: &[&str]| format!("{} ({})", names[0], names[1..].join(", "));
        [
            group(&ProviderKind::DEFAULT_NAMES[..]),
            group(&ProviderKind::ALTERNATE_NAMES[..]),
            group(&Self::STATUS_NAMES[..]),
        ]
        .join(", ")
    }
}
