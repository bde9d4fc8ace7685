use super::Session;
use crate::profile::keys::{
    PROMPT_COMMAND,
    PROMPT_CONFIG_INDICATOR,
    PROMPT_ENABLED_INDICATOR,
    PROMPT_ROMMON,
};
use core::fmt;

/// The privilege level a session appears to be at, inferred from the last prompt seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivilegeState {
    /// No recognizable prompt seen yet.
    Unknown,
    /// At the bootloader.
    Rommon,
    /// Logged in, unprivileged.
    User,
    /// Logged in and enabled.
    Privileged,
    /// Enabled and in configuration mode.
    Configuration,
}

impl fmt::Display for PrivilegeState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Rommon => "rommon",
            Self::User => "user",
            Self::Privileged => "privileged",
            Self::Configuration => "configuration",
        };

        f.write_str(s)
    }
}

impl Session {
    /// The most recent prompt matched by `login`, `enable` or `execute`.
    #[must_use]
    pub fn last_prompt(&self) -> &str {
        &self.last_prompt
    }

    /// Re-derive the privilege state from the last prompt. Performs no I/O.
    #[must_use]
    pub fn privilege_state(&self) -> PrivilegeState {
        let prompt = self.last_prompt.as_bytes();

        if prompt.is_empty() {
            return PrivilegeState::Unknown;
        }

        if self.profile.prompt(PROMPT_ROMMON).is_match(prompt) {
            return PrivilegeState::Rommon;
        }

        let enabled = self.profile.prompt(PROMPT_ENABLED_INDICATOR).is_match(prompt);

        if enabled && self.profile.prompt(PROMPT_CONFIG_INDICATOR).is_match(prompt) {
            return PrivilegeState::Configuration;
        }

        if enabled {
            return PrivilegeState::Privileged;
        }

        if self.profile.prompt(PROMPT_COMMAND).is_match(prompt) {
            return PrivilegeState::User;
        }

        PrivilegeState::Unknown
    }

    /// Returns true if the last prompt was a command prompt of any privilege.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(
            self.privilege_state(),
            PrivilegeState::User | PrivilegeState::Privileged | PrivilegeState::Configuration
        )
    }

    /// Returns true if the last prompt indicates privileged mode. Families that have no enable
    /// step are always enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        if !self.profile.needs_enable() {
            return true;
        }

        matches!(
            self.privilege_state(),
            PrivilegeState::Privileged | PrivilegeState::Configuration
        )
    }
}
