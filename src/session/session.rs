extern crate alloc;
use super::variant::Variant;
use crate::channel::Channel;
use crate::errors::{
    Error,
    Result,
};
use crate::profile::keys::{
    CMD_ENABLE_PAGING,
    CMD_LOGOUT,
};
use crate::profile::DeviceProfile;
use alloc::sync::Arc;
use core::time::Duration;
use log::{
    debug,
    info,
    warn,
};

/// A callback receiving every negotiation trace line.
pub type TraceSink = Box<dyn Fn(&str) + Send>;

/// The default timeout bounding every negotiation step.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The default pause after declining the setup wizard.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Timing arguments for a `Session`.
#[derive(Clone, Copy, Debug)]
pub struct Args {
    /// Bound on every blocking negotiation step.
    pub timeout: Duration,
    /// How long to let the device settle after declining the setup wizard.
    pub settle_delay: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// `Session` negotiates one administrative session with one device: login, enable, disable and
/// command round-trips, all driven by the device profile's prompts.
pub struct Session {
    pub(super) args: Args,
    pub(super) channel: Channel,
    pub(super) profile: Arc<DeviceProfile>,
    pub(super) variant: Variant,
    pub(super) trace_sink: Option<TraceSink>,
    pub(super) last_prompt: String,
    pub(super) is_open: bool,
}

impl Session {
    /// Returns a new `Session` over an existing channel. Most callers want the builder instead.
    #[must_use]
    pub fn new(
        args: Args,
        channel: Channel,
        profile: Arc<DeviceProfile>,
        variant: Variant,
        trace_sink: Option<TraceSink>,
    ) -> Self {
        Self {
            args,
            channel,
            profile,
            variant,
            trace_sink,
            last_prompt: String::new(),
            is_open: false,
        }
    }

    /// The device profile this session negotiates with.
    #[must_use]
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// The connection conventions in use.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The negotiation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.args.timeout
    }

    /// Returns true between a successful `open` and `close`.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub(super) fn trace(
        &self,
        msg: &str,
    ) {
        debug!("{}", msg);

        if let Some(sink) = &self.trace_sink {
            sink(msg);
        }
    }

    pub(super) fn ensure_open(&self) -> Result<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::NotOpen)
        }
    }

    /// Send `text` followed by the variant's line terminator, as one write.
    pub(super) fn send_line(
        &mut self,
        text: &str,
    ) -> Result<()> {
        self.channel.write_and_return(text.as_bytes())
    }

    /// Send the variant's wakeup probe, as one write.
    pub(super) fn wakeup(&mut self) -> Result<()> {
        self.trace("sending wakeup probe");

        self.channel.write(self.variant.wakeup.as_bytes())
    }

    /// Open the transport to `host`, on the variant's default port when `port` is `None`. Sends a
    /// wakeup probe right away for families that need one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the connection cannot be established.
    pub fn open(
        &mut self,
        host: &str,
        port: Option<u16>,
    ) -> Result<()> {
        let port = port.unwrap_or(self.variant.default_port);

        info!(
            "opening {} session to '{}:{}' as {}",
            self.variant.connection_type,
            host,
            port,
            self.profile.vendor()
        );

        self.channel.open(host, port)?;
        self.is_open = true;
        self.last_prompt.clear();

        if self.profile.needs_wakeup() {
            self.wakeup()?;
        }

        Ok(())
    }

    /// Close the session. When logged in, paging is restored and the logout command sent first,
    /// best effort. Closing a closed or never opened session does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport fails to release its resources; the session is
    /// marked closed regardless.
    pub fn close(&mut self) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }

        if self.is_logged_in() {
            if let Err(err) = self.run_command(CMD_ENABLE_PAGING) {
                warn!("failed restoring paging before close, error: {}", err);
            }

            let logout = self.profile.command(CMD_LOGOUT).to_owned();

            if !logout.is_empty() {
                self.trace("sending logout command");

                if let Err(err) = self.send_line(&logout) {
                    warn!("failed sending logout before close, error: {}", err);
                }
            }
        }

        info!("closing session");

        self.is_open = false;
        self.channel.close()
    }
}
