use crate::errors::{
    Error,
    Result,
};
use crate::transport::base::{
    Transport,
    TransportArgs,
    TransportSSHArgs,
};
use crate::util::pty::PtyChild;
use log::debug;
use nix::errno::Errno;
use nix::poll::{
    poll,
    PollFd,
    PollFlags,
};
use nix::unistd::dup;
use std::fs::File;
use std::io::{
    ErrorKind,
    Read,
    Write,
};
use std::os::unix::io::FromRawFd;
use std::process::Command;

/// The default binary to use for the `System` transport -- "ssh".
pub const DEFAULT_SSH_OPEN_BIN: &str = "ssh";

/// How long (in milliseconds) a read polls the pty before reporting "nothing yet".
const READ_POLL_MILLIS: i32 = 5;

/// A struct holding arguments specific to the `System` transport implementation.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct SystemArgs {
    /// The binary to spawn, "ssh" unless you know better.
    pub open_bin: String,
    /// Extra arguments appended after the generated ssh options.
    pub extra_args: Vec<String>,
}

impl Default for SystemArgs {
    fn default() -> Self {
        Self {
            open_bin: String::from(DEFAULT_SSH_OPEN_BIN),
            extra_args: vec![],
        }
    }
}

/// The "system" transport, the ssh binary running under a pty. Authentication prompts printed by
/// ssh show up in the stream like any other device prompt and are answered by the login dialog.
pub struct System {
    args: TransportArgs,
    ssh_args: TransportSSHArgs,
    system_args: SystemArgs,
    process: Option<PtyChild>,
    file: Option<File>,
}

impl System {
    /// Returns a new `System` instance.
    #[must_use]
    pub const fn new(
        args: TransportArgs,
        ssh_args: TransportSSHArgs,
        system_args: SystemArgs,
    ) -> Self {
        Self {
            args,
            ssh_args,
            system_args,
            process: None,
            file: None,
        }
    }

    /// The arguments `open_bin` is spawned with for `host`/`port`.
    #[must_use]
    pub fn open_args(
        &self,
        host: &str,
        port: u16,
    ) -> Vec<String> {
        let timeout = self.args.timeout_socket.as_secs();

        let mut open_args = vec![
            host.to_owned(),
            String::from("-p"),
            port.to_string(),
            String::from("-o"),
            format!("ConnectTimeout={timeout}"),
            String::from("-o"),
            format!("ServerAliveInterval={timeout}"),
        ];

        if !self.args.user.is_empty() {
            open_args.extend([String::from("-l"), self.args.user.clone()]);
        }

        if self.ssh_args.strict_key {
            open_args.extend([
                String::from("-o"),
                String::from("StrictHostKeyChecking=yes"),
            ]);

            if !self.ssh_args.known_hosts_file_path.is_empty() {
                open_args.extend([
                    String::from("-o"),
                    format!("UserKnownHostsFile={}", self.ssh_args.known_hosts_file_path),
                ]);
            }
        } else {
            open_args.extend([
                String::from("-o"),
                String::from("StrictHostKeyChecking=no"),
                String::from("-o"),
                String::from("UserKnownHostsFile=/dev/null"),
            ]);
        }

        if !self.ssh_args.config_file_path.is_empty() {
            open_args.extend([String::from("-F"), self.ssh_args.config_file_path.clone()]);
        }

        if !self.ssh_args.private_key_path.is_empty() {
            open_args.extend([String::from("-i"), self.ssh_args.private_key_path.clone()]);
        }

        open_args.extend(self.system_args.extra_args.iter().cloned());

        open_args
    }

    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or_else(|| Error::Transport {
            details: String::from("attempting to use system transport with no process"),
        })
    }
}

impl Transport for System {
    fn open(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<()> {
        let open_args = self.open_args(host, port);

        debug!(
            "opening system transport with bin '{}' and args '{:?}'",
            self.system_args.open_bin, open_args
        );

        let mut open_cmd = Command::new(&self.system_args.open_bin);
        open_cmd.args(&open_args);

        let process =
            PtyChild::spawn(open_cmd, self.args.term_height, self.args.term_width)?;

        let fd = dup(process.fd()).map_err(|err| Error::Transport {
            details: format!("failed duplicating pty file handle, error: {err}"),
        })?;

        // SAFETY: fd was just duplicated and is owned by nothing else.
        self.file = Some(unsafe { File::from_raw_fd(fd) });
        self.process = Some(process);

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.file = None;

        let Some(mut process) = self.process.take() else {
            return Ok(());
        };

        debug!("closing system transport");

        process.terminate()
    }

    fn alive(&mut self) -> bool {
        self.process.as_ref().map_or(false, PtyChild::alive)
    }

    fn read(&mut self) -> Result<Vec<u8>> {
        let read_size = self.args.read_size as usize;
        let Some(process) = self.process.as_ref() else {
            return Err(Error::Transport {
                details: String::from("attempting to read from system transport with no process"),
            });
        };

        let mut fds = [PollFd::new(process.fd(), PollFlags::POLLIN)];

        match poll(&mut fds, READ_POLL_MILLIS) {
            Ok(0) | Err(Errno::EINTR) => return Ok(vec![]),
            Ok(_) => {}
            Err(err) => {
                return Err(Error::Transport {
                    details: format!("error while polling pty, error: {err}"),
                })
            }
        }

        let mut b = vec![0_u8; read_size];

        match self.file()?.read(b.as_mut_slice()) {
            Ok(0) => Err(Error::Transport {
                details: String::from("ssh process closed the pty"),
            }),
            Ok(n) => {
                b.truncate(n);

                Ok(b)
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(vec![]),
            Err(err) => Err(Error::Transport {
                details: format!("error reading from pty, ssh process likely exited, error: {err}"),
            }),
        }
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<()> {
        let file = self.file()?;

        file.write_all(b)
            .and_then(|()| file.flush())
            .map_err(|err| Error::Transport {
                details: format!("failed writing to pty, error: {err}"),
            })
    }
}
