use crate::errors::Result;
use core::time::Duration;

/// The default telnet port.
pub const DEFAULT_TELNET_PORT: u16 = 23;

/// The default ssh port.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// The default time (in seconds) to use for the timeout socket parameter.
pub const DEFAULT_TIMEOUT_SOCKET_SECONDS: u64 = 30;

/// The default transport read size -- 8,192 bytes.
pub const DEFAULT_READ_SIZE: u16 = 8_192;

/// The default terminal height for transports (if applicable).
pub const DEFAULT_TERM_HEIGHT: u16 = 255;

/// The default terminal width for transports (if applicable).
pub const DEFAULT_TERM_WIDTH: u16 = 80;

/// The default ssh "strict key" setting (true, try to verify ssh key authenticity).
pub const DEFAULT_SSH_STRICT_KEY: bool = true;

/// Transport is the trait all netdevicers transports implement so a channel can scan their
/// output for prompts. Transports move raw bytes and nothing else -- no line endings are added
/// on write.
pub trait Transport {
    /// Open a byte stream to `host` on `port`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the host is unreachable or refuses the connection.
    fn open(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<()>;
    /// Release the byte stream. Closing a closed (or never opened) transport is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if releasing the underlying resource fails.
    fn close(&mut self) -> Result<()>;
    /// Indicates if the transport is "alive".
    fn alive(&mut self) -> bool;
    /// Read whatever is available right now. Implementations *must not block* for longer than a
    /// few milliseconds; an empty vec means "nothing yet".
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the stream failed or was closed by the remote end.
    fn read(&mut self) -> Result<Vec<u8>>;
    /// Write `b` to the stream as-is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the write fails.
    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<()>;
}

/// A struct holding generic arguments that apply to all transport flavors.
#[derive(Clone, Debug)]
pub struct TransportArgs {
    /// The username, only used by transports that authenticate outside of the login dialog.
    pub user: String,
    /// The timeout duration for initial socket connection.
    pub timeout_socket: Duration,
    /// The read size for each read of the transport (can leave this to the default!).
    pub read_size: u16,
    /// The terminal height to set on the transport object (not applicable to all transports).
    pub term_height: u16,
    /// The terminal width to set on the transport object (not applicable to all transports).
    pub term_width: u16,
}

impl Default for TransportArgs {
    fn default() -> Self {
        Self {
            user: String::new(),
            timeout_socket: Duration::from_secs(DEFAULT_TIMEOUT_SOCKET_SECONDS),
            read_size: DEFAULT_READ_SIZE,
            term_height: DEFAULT_TERM_HEIGHT,
            term_width: DEFAULT_TERM_WIDTH,
        }
    }
}

/// A struct holding ssh specific arguments for transports.
#[derive(Clone, Debug)]
pub struct TransportSSHArgs {
    /// Indicate if ssh strict key checking should be enabled or not.
    pub strict_key: bool,
    /// A path to a private key to use for authentication.
    pub private_key_path: String,
    /// The path to an ssh config file to use.
    pub config_file_path: String,
    /// The path to an ssh known hosts file to use.
    pub known_hosts_file_path: String,
}

impl Default for TransportSSHArgs {
    fn default() -> Self {
        Self {
            strict_key: DEFAULT_SSH_STRICT_KEY,
            private_key_path: String::new(),
            config_file_path: String::new(),
            known_hosts_file_path: String::new(),
        }
    }
}
