use crate::errors::{
    Error,
    Result,
};
use crate::transport::base::{
    Transport,
    TransportArgs,
};
use log::{
    debug,
    trace,
};
use std::io::{
    ErrorKind,
    Read,
    Write,
};
use std::net::{
    Shutdown,
    TcpStream,
    ToSocketAddrs,
};
use std::time::Duration;

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;
const NUL: u8 = 0;
const CR: u8 = b'\r';

/// How long a single read may block waiting for bytes.
const READ_POLL: Duration = Duration::from_millis(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Data,
    Cr,
    Iac,
    Negotiate(u8),
    Subnegotiation,
    SubnegotiationIac,
}

/// `Negotiator` strips telnet commands out of the inbound stream and refuses every option the
/// remote end offers or asks for. State carries over between reads so a command split across two
/// segments is still handled.
#[derive(Debug)]
pub struct Negotiator {
    state: State,
}

impl Default for Negotiator {
    fn default() -> Self {
        Self { state: State::Data }
    }
}

impl Negotiator {
    /// Returns a new `Negotiator` instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes from the socket. Returns the data bytes and the replies owed to the remote
    /// end.
    pub fn feed(
        &mut self,
        raw: &[u8],
    ) -> (Vec<u8>, Vec<u8>) {
        let mut data = Vec::with_capacity(raw.len());
        let mut replies = vec![];

        for &b in raw {
            self.state = match self.state {
                State::Data | State::Cr => {
                    if self.state == State::Cr && b == NUL {
                        State::Data
                    } else if b == IAC {
                        State::Iac
                    } else {
                        data.push(b);

                        if b == CR {
                            State::Cr
                        } else {
                            State::Data
                        }
                    }
                }
                State::Iac => match b {
                    IAC => {
                        data.push(IAC);

                        State::Data
                    }
                    DO | DONT | WILL | WONT => State::Negotiate(b),
                    SB => State::Subnegotiation,
                    _ => State::Data,
                },
                State::Negotiate(command) => {
                    match command {
                        DO => {
                            trace!("telnet refusing DO {b}");

                            replies.extend([IAC, WONT, b]);
                        }
                        WILL => {
                            trace!("telnet refusing WILL {b}");

                            replies.extend([IAC, DONT, b]);
                        }
                        _ => {}
                    }

                    State::Data
                }
                State::Subnegotiation => {
                    if b == IAC {
                        State::SubnegotiationIac
                    } else {
                        State::Subnegotiation
                    }
                }
                State::SubnegotiationIac => {
                    if b == SE {
                        State::Data
                    } else {
                        State::Subnegotiation
                    }
                }
            };
        }

        (data, replies)
    }
}

/// The telnet transport, a plain tcp socket with option negotiation stripped out of the stream.
pub struct Telnet {
    args: TransportArgs,
    stream: Option<TcpStream>,
    negotiator: Negotiator,
}

impl Telnet {
    /// Returns a new `Telnet` instance.
    #[must_use]
    pub fn new(args: TransportArgs) -> Self {
        Self {
            args,
            stream: None,
            negotiator: Negotiator::new(),
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or_else(|| Error::Transport {
            details: String::from("attempting to use telnet transport that is not open"),
        })
    }
}

impl Transport for Telnet {
    fn open(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<()> {
        debug!("opening telnet transport to '{}:{}'", host, port);

        let addrs = (host, port).to_socket_addrs().map_err(|err| Error::Transport {
            details: format!("failed resolving '{host}', error: {err}"),
        })?;

        let mut last_err = None;

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.args.timeout_socket) {
                Ok(stream) => {
                    stream
                        .set_read_timeout(Some(READ_POLL))
                        .and_then(|()| stream.set_nodelay(true))
                        .map_err(|err| Error::Transport {
                            details: format!("failed configuring telnet socket, error: {err}"),
                        })?;

                    self.negotiator = Negotiator::new();
                    self.stream = Some(stream);

                    return Ok(());
                }
                Err(err) => last_err = Some(err),
            }
        }

        Err(Error::Transport {
            details: last_err.map_or_else(
                || format!("no address found for '{host}'"),
                |err| format!("failed connecting to '{host}:{port}', error: {err}"),
            ),
        })
    }

    fn close(&mut self) -> Result<()> {
        let Some(stream) = self.stream.take() else {
            return Ok(());
        };

        debug!("closing telnet transport");

        match stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
            Err(err) => Err(Error::Transport {
                details: format!("failed shutting down telnet socket, error: {err}"),
            }),
        }
    }

    fn alive(&mut self) -> bool {
        self.stream.is_some()
    }

    fn read(&mut self) -> Result<Vec<u8>> {
        let read_size = self.args.read_size as usize;
        let stream = self.stream()?;

        let mut b = vec![0_u8; read_size];

        let n = match stream.read(b.as_mut_slice()) {
            Ok(0) => {
                return Err(Error::Transport {
                    details: String::from("telnet connection closed by remote host"),
                })
            }
            Ok(n) => n,
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Ok(vec![]);
            }
            Err(err) => {
                return Err(Error::Transport {
                    details: format!("failed reading from telnet socket, error: {err}"),
                })
            }
        };

        b.truncate(n);

        let (data, replies) = self.negotiator.feed(&b);

        if !replies.is_empty() {
            self.write(&replies)?;
        }

        Ok(data)
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<()> {
        let stream = self.stream()?;

        stream
            .write_all(b)
            .and_then(|()| stream.flush())
            .map_err(|err| Error::Transport {
                details: format!("failed writing to telnet socket, error: {err}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_offered_options() {
        let mut negotiator = Negotiator::new();

        let (data, replies) = negotiator.feed(&[IAC, WILL, 1, IAC, DO, 24, b'U', b's']);

        assert_eq!(data, b"Us".to_vec());
        assert_eq!(replies, vec![IAC, DONT, 1, IAC, WONT, 24]);
    }

    #[test]
    fn commands_split_across_reads() {
        let mut negotiator = Negotiator::new();

        let (data, replies) = negotiator.feed(&[b'a', IAC]);
        assert_eq!(data, b"a".to_vec());
        assert!(replies.is_empty());

        let (data, replies) = negotiator.feed(&[DO, 3, b'b']);
        assert_eq!(data, b"b".to_vec());
        assert_eq!(replies, vec![IAC, WONT, 3]);
    }

    #[test]
    fn subnegotiation_and_escapes() {
        let mut negotiator = Negotiator::new();

        let (data, replies) =
            negotiator.feed(&[IAC, SB, 24, 1, IAC, SE, b'x', IAC, IAC, b'\r', NUL, b'y']);

        assert_eq!(data, vec![b'x', IAC, b'\r', b'y']);
        assert!(replies.is_empty());
    }

    #[test]
    fn acknowledgements_need_no_reply() {
        let mut negotiator = Negotiator::new();

        let (data, replies) = negotiator.feed(&[IAC, WONT, 1, IAC, DONT, 3, b'>']);

        assert_eq!(data, b">".to_vec());
        assert!(replies.is_empty());
    }

    #[test]
    fn closed_transport_is_an_error_to_read() {
        let mut telnet = Telnet::new(TransportArgs::default());

        assert!(!telnet.alive());
        assert!(telnet.close().is_ok());
        assert!(matches!(telnet.read(), Err(Error::Transport { .. })));
    }
}
