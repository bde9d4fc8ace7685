use crate::errors::{
    Error,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::BTreeMap;

/// The embedded profile data: family-agnostic defaults plus one override delta per vendor.
pub const BUILTIN_PROFILES_YAML: &str = include_str!("../assets/profiles.yaml");

/// `Layer` is one layer of profile data. The defaults layer is complete, vendor layers only list
/// what differs from the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Layer {
    /// Whether privilege escalation is a distinct step for this family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_enable: Option<bool>,
    /// Whether a blank line must be sent before any prompt appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_wakeup: Option<bool>,
    /// Command key to literal command text.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
    /// Prompt key to regular expression source.
    #[serde(default)]
    pub prompts: BTreeMap<String, String>,
}

impl Layer {
    /// Lay `delta` over top of `self`, keys set in `delta` win.
    #[must_use]
    pub fn merged(
        &self,
        delta: &Self,
    ) -> Self {
        let mut out = self.clone();

        if delta.needs_enable.is_some() {
            out.needs_enable = delta.needs_enable;
        }

        if delta.needs_wakeup.is_some() {
            out.needs_wakeup = delta.needs_wakeup;
        }

        out.commands.extend(
            delta
                .commands
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        out.prompts.extend(
            delta
                .prompts
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        out
    }

    /// Parse a single layer from yaml.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProfileDefinition` if the yaml does not describe a layer.
    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|err| Error::ProfileDefinition {
            details: format!("failed parsing profile layer, error: {err}"),
        })
    }
}

/// `Definitions` is the whole profile document -- defaults and the vendor deltas.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Definitions {
    /// The family-agnostic defaults.
    pub defaults: Layer,
    /// Vendor tag to override delta.
    #[serde(default)]
    pub vendors: BTreeMap<String, Layer>,
}

impl Definitions {
    /// Parse a profile document from yaml.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProfileDefinition` if the document can not be deserialized.
    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|err| Error::ProfileDefinition {
            details: format!("failed parsing profile definitions, error: {err}"),
        })
    }

    /// Parse the embedded built-in definitions.
    ///
    /// # Errors
    ///
    /// Only if the embedded asset is broken, which would be a bug.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_PROFILES_YAML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_definitions_parse() {
        let definitions = Definitions::builtin().unwrap();

        for vendor in ["IOS", "NXOS", "CatOS", "Pix", "ASA", "BB"] {
            assert!(definitions.vendors.contains_key(vendor), "missing {vendor}");
        }

        assert_eq!(definitions.defaults.needs_enable, Some(true));
    }

    #[test]
    fn delta_overrides_only_what_it_names() {
        let base = Layer::from_yaml(
            "needs-enable: true\ncommands:\n  enable: enable\n  getConfig: ''\nprompts:\n  command: 'x#'\n",
        )
        .unwrap();
        let delta =
            Layer::from_yaml("needs-enable: false\ncommands:\n  getConfig: show run\n").unwrap();

        let merged = base.merged(&delta);

        assert_eq!(merged.needs_enable, Some(false));
        assert_eq!(merged.needs_wakeup, None);
        assert_eq!(merged.commands["enable"], "enable");
        assert_eq!(merged.commands["getConfig"], "show run");
        assert_eq!(merged.prompts["command"], "x#");
    }

    #[test]
    fn asa_paging_commands_keep_line_breaks() {
        let definitions = Definitions::builtin().unwrap();

        assert_eq!(
            definitions.vendors["ASA"].commands["disablePaging"],
            "conf t\r\nno pager\r\nend"
        );
    }

    #[test]
    fn garbage_yaml_is_a_definition_error() {
        let err = Definitions::from_yaml("defaults: [1, 2").unwrap_err();

        assert!(matches!(err, Error::ProfileDefinition { .. }));
    }
}
