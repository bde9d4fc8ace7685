use core::fmt::{
    Display,
    Formatter,
};
use core::time::Duration;
use thiserror::Error as ThisError;

/// Why a login or enable dialog gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationFailure {
    /// The same prompt came back after we already answered it, typically bad credentials.
    RepeatedPrompt {
        /// The profile prompt key that repeated, ex: "username" or "password".
        key: String,
        /// How many times the prompt was seen before giving up.
        attempts: u8,
    },
    /// No known prompt showed up, even after the wakeup probe.
    NoPrompt {
        /// How many wakeup probes were sent before giving up.
        wakeups: u8,
    },
}

impl Display for NegotiationFailure {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::RepeatedPrompt { key, attempts } => {
                write!(f, "prompt '{key}' seen {attempts} times")
            }
            Self::NoPrompt { wakeups } => {
                write!(f, "no prompt found after {wakeups} wakeup probe(s)")
            }
        }
    }
}

/// `Error` is the closed set of failures netdevicers can report.
#[derive(Debug, ThisError)]
pub enum Error {
    /// No profile is registered for the requested vendor tag.
    #[error("device class '{vendor}' not supported")]
    UnsupportedDeviceClass {
        /// The vendor tag that was requested.
        vendor: String,
    },

    /// The requested connection type is neither telnet nor ssh.
    #[error("connection type '{kind}' not supported")]
    UnsupportedConnectionType {
        /// The connection type that was requested.
        kind: String,
    },

    /// The login dialog did not resolve. Bad username or password, or an unresponsive device.
    #[error("login failed: {reason}")]
    LoginFailed {
        /// What made the dialog give up.
        reason: NegotiationFailure,
    },

    /// The privilege escalation dialog exhausted its retries.
    #[error("enable failed: {reason}")]
    EnableFailed {
        /// What made the dialog give up.
        reason: NegotiationFailure,
    },

    /// The disable command ran but the device still shows a privileged prompt.
    #[error("disable command failed, last prompt '{last_prompt}' still privileged")]
    DisableFailed {
        /// The prompt observed after sending the disable command.
        last_prompt: String,
    },

    /// No expected prompt showed up before the timeout elapsed.
    #[error("timed out after {timeout:?} waiting for a prompt")]
    TransportTimeout {
        /// The timeout that elapsed.
        timeout: Duration,
        /// Everything read while waiting.
        consumed: String,
    },

    /// An operation that needs an open session was called on a closed one.
    #[error("session is not open")]
    NotOpen,

    /// An operation that needs privileged mode was called while not enabled.
    #[error("'{operation}' requires an enabled session")]
    NotEnabled {
        /// The refused operation.
        operation: String,
    },

    /// A profile prompt pattern does not compile.
    #[error("prompt '{key}' has an invalid pattern: {source}")]
    InvalidPattern {
        /// The profile prompt key.
        key: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },

    /// A profile definition could not be read.
    #[error("invalid profile definition: {details}")]
    ProfileDefinition {
        /// What was wrong with it.
        details: String,
    },

    /// The underlying transport failed (socket, pty or process errors).
    #[error("transport error: {details}")]
    Transport {
        /// Details from the underlying failure.
        details: String,
    },
}

/// Result alias used throughout netdevicers.
pub type Result<T> = core::result::Result<T, Error>;
