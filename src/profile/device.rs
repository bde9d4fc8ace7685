use super::definition::Layer;
use super::keys::ENGINE_PROMPTS;
use super::prompt::Prompt;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static UNMATCHED: Lazy<Prompt> = Lazy::new(|| Prompt::unmatched(""));

/// `DeviceProfile` is the immutable table of commands and prompts for one device family. Sessions
/// share profiles read-only, typically behind an `Arc`.
#[derive(Clone, Debug)]
pub struct DeviceProfile {
    vendor: String,
    needs_enable: bool,
    needs_wakeup: bool,
    commands: HashMap<String, String>,
    prompts: HashMap<String, Prompt>,
}

impl DeviceProfile {
    /// Build a profile by laying `delta` over `defaults` and compiling every prompt. Engine prompt
    /// keys missing from both layers are installed as never-matching prompts.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if any prompt pattern fails to compile.
    pub fn from_layers(
        vendor: &str,
        defaults: &Layer,
        delta: &Layer,
    ) -> Result<Self> {
        let layer = defaults.merged(delta);

        let mut prompts = HashMap::with_capacity(layer.prompts.len() + ENGINE_PROMPTS.len());

        for key in ENGINE_PROMPTS {
            prompts.insert(key.to_owned(), Prompt::unmatched(key));
        }

        for (key, pattern) in &layer.prompts {
            prompts.insert(key.clone(), Prompt::new(key, pattern)?);
        }

        Ok(Self {
            vendor: vendor.to_owned(),
            needs_enable: layer.needs_enable.unwrap_or(true),
            needs_wakeup: layer.needs_wakeup.unwrap_or(false),
            commands: layer.commands.into_iter().collect(),
            prompts,
        })
    }

    /// The vendor tag, ex: "IOS".
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Whether privilege escalation is a distinct step for this family.
    #[must_use]
    pub const fn needs_enable(&self) -> bool {
        self.needs_enable
    }

    /// Whether a blank line must be sent before the device shows any prompt.
    #[must_use]
    pub const fn needs_wakeup(&self) -> bool {
        self.needs_wakeup
    }

    /// Command text for `key`, empty (a no-op) if the family does not define it.
    #[must_use]
    pub fn command(
        &self,
        key: &str,
    ) -> &str {
        self.commands.get(key).map_or("", String::as_str)
    }

    /// Prompt for `key`, a never-matching prompt if the family does not define it.
    #[must_use]
    pub fn prompt(
        &self,
        key: &str,
    ) -> &Prompt {
        self.prompts.get(key).unwrap_or(&UNMATCHED)
    }

    /// Clone the prompts for `keys`, in order, ready to hand to an `expect` call.
    #[must_use]
    pub fn prompts(
        &self,
        keys: &[&str],
    ) -> Vec<Prompt> {
        keys.iter().map(|key| self.prompt(key).clone()).collect()
    }
}
