extern crate alloc;
use super::session::{
    Args,
    Session,
    TraceSink,
};
use super::variant::ConnectionType;
use crate::channel::{
    Args as ChannelArgs,
    Channel,
};
use crate::errors::Result;
use crate::profile::{
    create_profile,
    DeviceProfile,
};
use crate::transport::base::{
    Transport,
    TransportArgs,
    TransportSSHArgs,
};
use crate::transport::system::{
    System,
    SystemArgs,
};
use crate::transport::telnet::Telnet;
use alloc::sync::Arc;
use core::time::Duration;

/// `Builder` binds a connection type and a device profile into a `Session`, holding every setting
/// with a sane default until `build` is called.
pub struct Builder {
    connection_type: ConnectionType,
    profile: Arc<DeviceProfile>,
    args: Args,
    channel_args: ChannelArgs,
    transport_args: TransportArgs,
    transport_ssh_args: TransportSSHArgs,
    transport_system_args: SystemArgs,
    trace_sink: Option<TraceSink>,
}

#[allow(clippy::missing_const_for_fn)]
#[allow(clippy::return_self_not_must_use)]
#[allow(clippy::must_use_candidate)]
impl Builder {
    /// Return a new instance of `Builder` with sane defaults set.
    pub fn new(
        connection_type: ConnectionType,
        profile: Arc<DeviceProfile>,
    ) -> Self {
        Self {
            connection_type,
            profile,
            args: Args::default(),
            channel_args: ChannelArgs {
                return_char: connection_type.variant().line_terminator.to_owned(),
                ..ChannelArgs::default()
            },
            transport_args: TransportArgs::default(),
            transport_ssh_args: TransportSSHArgs::default(),
            transport_system_args: SystemArgs::default(),
            trace_sink: None,
        }
    }

    /// Return a new `Builder` from a connection type name ("telnet" or "ssh") and a built-in
    /// vendor tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedConnectionType` or `Error::UnsupportedDeviceClass` for names
    /// that are not known.
    pub fn from_names(
        connection_type: &str,
        vendor: &str,
    ) -> Result<Self> {
        Ok(Self::new(connection_type.parse()?, create_profile(vendor)?))
    }

    /// Sets the `timeout` bounding every negotiation step.
    pub fn timeout(
        mut self,
        d: Duration,
    ) -> Self {
        self.args.timeout = d;

        self
    }

    /// Sets the `settle_delay`, the pause after declining a setup wizard.
    pub fn settle_delay(
        mut self,
        d: Duration,
    ) -> Self {
        self.args.settle_delay = d;

        self
    }

    /// Sets the `read_delay` of the underlying channel.
    pub fn read_delay(
        mut self,
        d: Duration,
    ) -> Self {
        self.channel_args.read_delay = d;

        self
    }

    /// Sets whether ANSI escape sequences are stripped from device output (on by default).
    pub fn strip_ansi(
        mut self,
        b: bool,
    ) -> Self {
        self.channel_args.strip_ansi = b;

        self
    }

    /// Sets a sink receiving every negotiation trace line.
    pub fn trace_sink(
        mut self,
        sink: impl Fn(&str) + Send + 'static,
    ) -> Self {
        self.trace_sink = Some(Box::new(sink));

        self
    }

    /// Sets the `user` handed to ssh up front (`-l`). Ignored by telnet, which answers the
    /// username prompt during login instead.
    pub fn user(
        mut self,
        s: &str,
    ) -> Self {
        self.transport_args.user = s.to_owned();

        self
    }

    /// Sets the `timeout_socket` for the initial connection.
    pub fn timeout_socket(
        mut self,
        d: Duration,
    ) -> Self {
        self.transport_args.timeout_socket = d;

        self
    }

    /// Sets the terminal size the ssh process sees on its pty.
    pub fn term_size(
        mut self,
        height: u16,
        width: u16,
    ) -> Self {
        self.transport_args.term_height = height;
        self.transport_args.term_width = width;

        self
    }

    /// Sets the ssh `strict_key` (host key checking) option.
    pub fn ssh_strict_key(
        mut self,
        b: bool,
    ) -> Self {
        self.transport_ssh_args.strict_key = b;

        self
    }

    /// Sets the ssh private key path.
    pub fn ssh_private_key_path(
        mut self,
        s: &str,
    ) -> Self {
        self.transport_ssh_args.private_key_path = s.to_owned();

        self
    }

    /// Sets the ssh config file path.
    pub fn ssh_config_file_path(
        mut self,
        s: &str,
    ) -> Self {
        self.transport_ssh_args.config_file_path = s.to_owned();

        self
    }

    /// Sets the ssh known hosts file path.
    pub fn ssh_known_hosts_file_path(
        mut self,
        s: &str,
    ) -> Self {
        self.transport_ssh_args.known_hosts_file_path = s.to_owned();

        self
    }

    /// Sets the binary the ssh transport spawns.
    pub fn system_open_bin(
        mut self,
        s: &str,
    ) -> Self {
        self.transport_system_args.open_bin = s.to_owned();

        self
    }

    /// Sets extra arguments appended to the ssh command line.
    pub fn system_extra_args(
        mut self,
        args: Vec<String>,
    ) -> Self {
        self.transport_system_args.extra_args = args;

        self
    }

    /// Build the `Session` over the transport matching the connection type.
    pub fn build(self) -> Session {
        let transport: Box<dyn Transport + Send> = match self.connection_type {
            ConnectionType::Telnet => Box::new(Telnet::new(self.transport_args.clone())),
            ConnectionType::Ssh => Box::new(System::new(
                self.transport_args.clone(),
                self.transport_ssh_args.clone(),
                self.transport_system_args.clone(),
            )),
        };

        self.finish(transport)
    }

    /// Build the `Session` over a caller supplied transport, keeping the connection type's
    /// conventions.
    pub fn build_with_transport(
        self,
        t: impl Transport + Send + 'static,
    ) -> Session {
        self.finish(Box::new(t))
    }

    fn finish(
        self,
        transport: Box<dyn Transport + Send>,
    ) -> Session {
        Session::new(
            self.args,
            Channel::from_boxed(self.channel_args, transport),
            self.profile,
            self.connection_type.variant(),
            self.trace_sink,
        )
    }
}

/// Create a `Session` with default settings from a connection type name and a built-in vendor
/// tag.
///
/// # Errors
///
/// Returns `Error::UnsupportedConnectionType` or `Error::UnsupportedDeviceClass` for names that
/// are not known.
pub fn create_session(
    connection_type: &str,
    vendor: &str,
) -> Result<Session> {
    Ok(Builder::from_names(connection_type, vendor)?.build())
}
