use crate::errors::{
    Error,
    Result,
};
use log::debug;
use nix::errno::Errno;
use nix::fcntl::{
    open,
    OFlag,
};
use nix::libc::{
    ioctl,
    STDERR_FILENO,
    STDIN_FILENO,
    STDOUT_FILENO,
    TIOCSWINSZ,
};
use nix::pty::{
    grantpt,
    posix_openpt,
    unlockpt,
    PtyMaster,
    Winsize,
};
use nix::sys::signal::{
    kill,
    Signal,
};
use nix::sys::stat::Mode;
use nix::sys::termios;
use nix::sys::wait::{
    waitpid,
    WaitPidFlag,
    WaitStatus,
};
use nix::unistd::{
    dup2,
    fork,
    setsid,
    ForkResult,
    Pid,
};
use std::os::unix::io::{
    AsRawFd,
    RawFd,
};
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

/// How long a child gets to exit after SIGTERM before it is killed outright.
const TERMINATE_GRACE: Duration = Duration::from_millis(500);
const TERMINATE_POLL: Duration = Duration::from_millis(20);

fn pty_error(
    what: &str,
    err: nix::Error,
) -> Error {
    Error::Transport {
        details: format!("failed {what}, error: {err}"),
    }
}

#[cfg(target_os = "linux")]
fn slave_name(master: &PtyMaster) -> nix::Result<String> {
    nix::pty::ptsname_r(master)
}

#[cfg(not(target_os = "linux"))]
fn slave_name(master: &PtyMaster) -> nix::Result<String> {
    // SAFETY: nothing else in this process calls ptsname concurrently while a child is spawning.
    unsafe { nix::pty::ptsname(master) }
}

fn set_window_size(
    master: &PtyMaster,
    rows: u16,
    cols: u16,
) -> nix::Result<()> {
    let size = Winsize {
        ws_row: rows,
        ws_col: cols,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: size lives across the call and is the struct TIOCSWINSZ reads.
    let res = unsafe { ioctl(master.as_raw_fd(), TIOCSWINSZ, &size) };

    Errno::result(res).map(|_| ())
}

/// `PtyChild` is a process running with a pseudo terminal as its controlling terminal. The master
/// side is non-blocking; the child is terminated when this is dropped.
pub struct PtyChild {
    master: PtyMaster,
    pid: Pid,
    reaped: bool,
}

impl PtyChild {
    /// Fork and exec `command` on a fresh `rows` by `cols` pty with local echo turned off.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the pty cannot be allocated or the fork fails. Exec failures
    /// surface as the child exiting with status 127.
    pub fn spawn(
        mut command: Command,
        rows: u16,
        cols: u16,
    ) -> Result<Self> {
        let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY | OFlag::O_NONBLOCK)
            .map_err(|err| pty_error("opening pty master", err))?;

        grantpt(&master).map_err(|err| pty_error("granting pty", err))?;
        unlockpt(&master).map_err(|err| pty_error("unlocking pty", err))?;
        set_window_size(&master, rows, cols)
            .map_err(|err| pty_error("setting pty window size", err))?;

        let slave = slave_name(&master).map_err(|err| pty_error("resolving pty slave", err))?;

        // SAFETY: the child only sets up its stdio and then execs.
        match unsafe { fork() }.map_err(|err| pty_error("forking", err))? {
            ForkResult::Child => {
                if Self::attach(&slave).is_err() {
                    std::process::exit(126);
                }

                let _err = command.exec();

                std::process::exit(127);
            }
            ForkResult::Parent { child } => {
                debug!("spawned pty child pid {}", child);

                Ok(Self {
                    master,
                    pid: child,
                    reaped: false,
                })
            }
        }
    }

    fn attach(slave: &str) -> nix::Result<()> {
        setsid()?;

        let slave_fd = open(Path::new(slave), OFlag::O_RDWR, Mode::empty())?;

        dup2(slave_fd, STDIN_FILENO)?;
        dup2(slave_fd, STDOUT_FILENO)?;
        dup2(slave_fd, STDERR_FILENO)?;

        let mut attrs = termios::tcgetattr(STDIN_FILENO)?;
        attrs.local_flags &= !termios::LocalFlags::ECHO;
        termios::tcsetattr(STDIN_FILENO, termios::SetArg::TCSANOW, &attrs)
    }

    /// The raw master file descriptor.
    #[must_use]
    pub fn fd(&self) -> RawFd {
        self.master.as_raw_fd()
    }

    /// Non-blocking status check, `None` once the child has been reaped or on error.
    #[must_use]
    pub fn status(&self) -> Option<WaitStatus> {
        if self.reaped {
            return None;
        }

        waitpid(self.pid, Some(WaitPidFlag::WNOHANG)).ok()
    }

    /// Returns true if the child has not exited yet.
    #[must_use]
    pub fn alive(&self) -> bool {
        matches!(
            self.status(),
            Some(WaitStatus::StillAlive | WaitStatus::Continued(_))
        )
    }

    /// Ask the child to exit, killing it if it has not gone away after a short grace period.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the child cannot be signalled.
    pub fn terminate(&mut self) -> Result<()> {
        if self.reaped {
            return Ok(());
        }

        if !self.alive() {
            self.reaped = true;

            return Ok(());
        }

        kill(self.pid, Signal::SIGTERM).map_err(|err| pty_error("signalling pty child", err))?;

        let mut waited = Duration::ZERO;

        while waited < TERMINATE_GRACE {
            if !self.alive() {
                self.reaped = true;

                return Ok(());
            }

            thread::sleep(TERMINATE_POLL);
            waited += TERMINATE_POLL;
        }

        debug!("pty child {} ignored SIGTERM, killing", self.pid);

        match kill(self.pid, Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(err) => return Err(pty_error("killing pty child", err)),
        }

        let _status = waitpid(self.pid, None);
        self.reaped = true;

        Ok(())
    }
}

impl Drop for PtyChild {
    fn drop(&mut self) {
        let _result = self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::libc::TIOCGWINSZ;

    #[test]
    fn spawned_pty_carries_window_size() {
        let mut child = PtyChild::spawn(Command::new("true"), 40, 132).unwrap();

        let mut size = Winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        // SAFETY: size is a valid, writable winsize for the duration of the call.
        let res = unsafe { ioctl(child.fd(), TIOCGWINSZ, &mut size) };

        assert_eq!(res, 0);
        assert_eq!((size.ws_row, size.ws_col), (40, 132));
        assert!(child.terminate().is_ok());
    }
}
