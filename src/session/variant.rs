use crate::errors::Error;
use crate::transport::base::{
    DEFAULT_SSH_PORT,
    DEFAULT_TELNET_PORT,
};
use core::fmt;
use core::str::FromStr;

/// The two connection flavors a session can negotiate over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionType {
    /// Plain telnet.
    Telnet,
    /// ssh, via the system ssh binary.
    Ssh,
}

impl ConnectionType {
    /// The negotiation conventions for this connection type.
    #[must_use]
    pub const fn variant(self) -> Variant {
        match self {
            Self::Telnet => Variant {
                connection_type: self,
                line_terminator: "\r\n",
                wakeup: "\r\n\r\n",
                default_port: DEFAULT_TELNET_PORT,
                auto_escalates: false,
                initial_config_ends_login: true,
            },
            Self::Ssh => Variant {
                connection_type: self,
                line_terminator: "\n",
                wakeup: "\r\n",
                default_port: DEFAULT_SSH_PORT,
                auto_escalates: true,
                initial_config_ends_login: false,
            },
        }
    }
}

impl FromStr for ConnectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "telnet" => Ok(Self::Telnet),
            "ssh" => Ok(Self::Ssh),
            _ => Err(Error::UnsupportedConnectionType { kind: s.to_owned() }),
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Telnet => f.write_str("telnet"),
            Self::Ssh => f.write_str("ssh"),
        }
    }
}

/// `Variant` describes how a connection type differs during negotiation. The state machines are
/// the same for every variant; only these values change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variant {
    /// The connection type this describes.
    pub connection_type: ConnectionType,
    /// Appended to every line sent.
    pub line_terminator: &'static str,
    /// Sent, as one write, to coax a prompt out of a silent device.
    pub wakeup: &'static str,
    /// Port used when the caller does not give one.
    pub default_port: u16,
    /// Privileged operations are attempted without checking the enable state first.
    pub auto_escalates: bool,
    /// Declining the setup wizard finishes the login dialog instead of resuming it.
    pub initial_config_ends_login: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_connection_types() {
        assert_eq!("telnet".parse::<ConnectionType>().unwrap(), ConnectionType::Telnet);
        assert_eq!("SSH".parse::<ConnectionType>().unwrap(), ConnectionType::Ssh);

        let err = "serial".parse::<ConnectionType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedConnectionType { ref kind } if kind == "serial"));
    }

    #[test]
    fn variants_differ_only_in_conventions() {
        let telnet = ConnectionType::Telnet.variant();
        let ssh = ConnectionType::Ssh.variant();

        assert_eq!(telnet.line_terminator, "\r\n");
        assert_eq!(telnet.wakeup, "\r\n\r\n");
        assert_eq!(telnet.default_port, 23);
        assert!(!telnet.auto_escalates);

        assert_eq!(ssh.line_terminator, "\n");
        assert_eq!(ssh.default_port, 22);
        assert!(ssh.auto_escalates);
        assert!(!ssh.initial_config_ends_login);
    }
}
