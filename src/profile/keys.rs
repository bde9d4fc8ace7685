// command keys

/// Enter privileged mode.
pub const CMD_ENABLE: &str = "enable";
/// Leave privileged mode.
pub const CMD_DISABLE: &str = "disable";
/// Turn terminal paging off.
pub const CMD_DISABLE_PAGING: &str = "disablePaging";
/// Turn terminal paging back on.
pub const CMD_ENABLE_PAGING: &str = "enablePaging";
/// Dump the running configuration.
pub const CMD_GET_CONFIG: &str = "getConfig";
/// End the session on the device side.
pub const CMD_LOGOUT: &str = "logout";

/// Every command key the session engine looks up on its own.
pub const ENGINE_COMMANDS: [&str; 6] = [
    CMD_ENABLE,
    CMD_DISABLE,
    CMD_DISABLE_PAGING,
    CMD_ENABLE_PAGING,
    CMD_GET_CONFIG,
    CMD_LOGOUT,
];

// prompt keys

/// "login:" style prompt.
pub const PROMPT_LOGIN: &str = "login";
/// "Username:" style prompt.
pub const PROMPT_USERNAME: &str = "username";
/// "Password:" style prompt, used by both the login and enable dialogs.
pub const PROMPT_PASSWORD: &str = "password";
/// Any command prompt, privileged or not.
pub const PROMPT_COMMAND: &str = "command";
/// A privileged command prompt.
pub const PROMPT_COMMAND_ENABLED: &str = "command-enabled";
/// An unprivileged command prompt.
pub const PROMPT_COMMAND_NOT_ENABLED: &str = "command-notenabled";
/// Matched against the last prompt to tell whether the session is privileged.
pub const PROMPT_ENABLED_INDICATOR: &str = "enabledIndicator";
/// Matched against the last prompt to tell whether the session is in configuration mode.
pub const PROMPT_CONFIG_INDICATOR: &str = "configIndicator";
/// Bootloader prompt.
pub const PROMPT_ROMMON: &str = "rommon";
/// The setup wizard question an unconfigured device asks.
pub const PROMPT_INITIAL_CONFIG: &str = "initialconfig";
/// A confirmation question, ex: "[confirm]".
pub const PROMPT_CONFIRM: &str = "confirm";

/// Every prompt key the session engine looks up on its own.
pub const ENGINE_PROMPTS: [&str; 11] = [
    PROMPT_LOGIN,
    PROMPT_USERNAME,
    PROMPT_PASSWORD,
    PROMPT_COMMAND,
    PROMPT_COMMAND_ENABLED,
    PROMPT_COMMAND_NOT_ENABLED,
    PROMPT_ENABLED_INDICATOR,
    PROMPT_CONFIG_INDICATOR,
    PROMPT_ROMMON,
    PROMPT_INITIAL_CONFIG,
    PROMPT_CONFIRM,
];
