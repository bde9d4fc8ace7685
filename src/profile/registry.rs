extern crate alloc;
use super::definition::{
    Definitions,
    Layer,
};
use super::device::DeviceProfile;
use crate::errors::{
    Error,
    Result,
};
use alloc::sync::Arc;
use log::debug;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;

/// `ProfileRegistry` maps vendor tags to device profiles. Registering a family only takes the
/// delta from the defaults.
#[derive(Clone, Debug, Default)]
pub struct ProfileRegistry {
    defaults: Layer,
    vendors: BTreeMap<String, Layer>,
}

impl ProfileRegistry {
    /// Registry holding the built-in families (IOS, NXOS, CatOS, Pix, ASA, BB).
    ///
    /// # Errors
    ///
    /// Only if the embedded profile asset is broken, which would be a bug.
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_definitions(Definitions::builtin()?))
    }

    /// Registry built from a full profile document.
    #[must_use]
    pub fn from_definitions(definitions: Definitions) -> Self {
        Self {
            defaults: definitions.defaults,
            vendors: definitions.vendors,
        }
    }

    /// Register (or replace) a vendor as a delta over the defaults.
    pub fn register(
        &mut self,
        vendor: &str,
        delta: Layer,
    ) {
        debug!("registering device profile '{}'", vendor);

        self.vendors.insert(vendor.to_owned(), delta);
    }

    /// Register (or replace) a vendor from a yaml delta.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProfileDefinition` if the yaml is not a profile layer.
    pub fn register_yaml(
        &mut self,
        vendor: &str,
        yaml: &str,
    ) -> Result<()> {
        self.register(vendor, Layer::from_yaml(yaml)?);

        Ok(())
    }

    /// Returns true if `vendor` is registered.
    #[must_use]
    pub fn contains(
        &self,
        vendor: &str,
    ) -> bool {
        self.vendors.contains_key(vendor)
    }

    /// Registered vendor tags, sorted.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.vendors.keys().map(String::as_str)
    }

    /// Create the profile for `vendor`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDeviceClass` for an unknown tag, or `Error::InvalidPattern` if
    /// the merged prompts do not compile.
    pub fn create(
        &self,
        vendor: &str,
    ) -> Result<Arc<DeviceProfile>> {
        let Some(delta) = self.vendors.get(vendor) else {
            return Err(Error::UnsupportedDeviceClass {
                vendor: vendor.to_owned(),
            });
        };

        Ok(Arc::new(DeviceProfile::from_layers(
            vendor,
            &self.defaults,
            delta,
        )?))
    }
}

/// Create a built-in profile for `vendor`. The built-in registry is parsed once.
///
/// # Errors
///
/// Returns `Error::UnsupportedDeviceClass` for a tag that is not built in.
pub fn create_profile(vendor: &str) -> Result<Arc<DeviceProfile>> {
    static BUILTIN: OnceCell<ProfileRegistry> = OnceCell::new();

    BUILTIN.get_or_try_init(ProfileRegistry::builtin)?.create(vendor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::keys::{
        CMD_DISABLE_PAGING,
        CMD_GET_CONFIG,
        CMD_LOGOUT,
        ENGINE_COMMANDS,
        ENGINE_PROMPTS,
        PROMPT_COMMAND,
        PROMPT_ROMMON,
    };

    #[test]
    fn unknown_vendor_is_unsupported() {
        let err = create_profile("JunOS").unwrap_err();

        assert!(matches!(err, Error::UnsupportedDeviceClass { ref vendor } if vendor == "JunOS"));
    }

    #[test]
    fn every_engine_key_resolves_for_every_builtin() {
        let registry = ProfileRegistry::builtin().unwrap();

        for vendor in registry.vendors() {
            let profile = registry.create(vendor).unwrap();

            for key in ENGINE_COMMANDS {
                let _: &str = profile.command(key);
            }

            for key in ENGINE_PROMPTS {
                assert_eq!(profile.prompt(key).key(), key, "{vendor} {key}");
            }
        }
    }

    #[test]
    fn undefined_keys_are_blank_and_unmatched() {
        let profile = create_profile("IOS").unwrap();

        assert_eq!(profile.command(CMD_LOGOUT), "");
        assert_eq!(profile.command("no-such-command"), "");
        assert!(!profile.prompt("no-such-prompt").is_match(b"router#"));
    }

    #[test]
    fn vendor_overrides_land_over_defaults() {
        let ios = create_profile("IOS").unwrap();
        let nxos = create_profile("NXOS").unwrap();
        let bb = create_profile("BB").unwrap();

        assert!(ios.needs_enable());
        assert!(!nxos.needs_enable());
        assert!(!bb.needs_enable());

        assert_eq!(ios.command(CMD_DISABLE_PAGING), "terminal length 0");
        assert_eq!(ios.command("enable"), "enable");
        assert_eq!(bb.command(CMD_GET_CONFIG), "/S\r\n");

        assert!(nxos.prompt(PROMPT_ROMMON).is_match(b"switch(boot)#"));
        assert!(!ios.prompt(PROMPT_ROMMON).is_match(b"switch(boot)#"));
        assert!(ios.prompt(PROMPT_ROMMON).is_match(b"rommon 1 >"));

        assert!(bb.prompt(PROMPT_COMMAND).is_match(b"RPM>"));
        assert!(!bb.prompt(PROMPT_COMMAND).is_match(b"router#"));
    }

    #[test]
    fn custom_family_only_needs_a_delta() {
        let mut registry = ProfileRegistry::builtin().unwrap();

        registry
            .register_yaml(
                "EdgeOS",
                "needs-enable: false\ncommands:\n  disablePaging: terminal length 0\n",
            )
            .unwrap();

        let profile = registry.create("EdgeOS").unwrap();

        assert!(!profile.needs_enable());
        assert_eq!(profile.command(CMD_DISABLE_PAGING), "terminal length 0");
        assert_eq!(profile.command("enable"), "enable");
        assert!(profile.prompt(PROMPT_COMMAND).is_match(b"ubnt@edge>"));
    }
}
