use super::constants::ANSI_ESCAPE_BYTE;
use super::util::strip_ansi;
use super::Args;
use crate::errors::Result;
use crate::transport::base::Transport;
use core::str;
use log::{
    debug,
    info,
};

/// The netdevicers `Channel` object -- the channel "wraps" the transport object, writes to it and
/// keeps whatever was read but not yet consumed by a prompt match.
pub struct Channel {
    /// The arguments that the channel was created with.
    pub args: Args,
    pub(super) transport: Box<dyn Transport + Send>,
    pub(super) buffer: Vec<u8>,
}

impl Channel {
    /// Returns a new instance of `Channel` wrapping the given transport.
    #[must_use]
    pub fn new(
        args: Args,
        t: impl Transport + Send + 'static,
    ) -> Self {
        Self::from_boxed(args, Box::new(t))
    }

    /// Returns a new instance of `Channel` wrapping an already boxed transport.
    #[must_use]
    pub fn from_boxed(
        args: Args,
        transport: Box<dyn Transport + Send>,
    ) -> Self {
        Self {
            args,
            transport,
            buffer: vec![],
        }
    }

    /// Open the underlying transport, discarding anything left over from a previous connection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport cannot be opened.
    pub fn open(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<()> {
        info!("channel opening to '{}:{}'", host, port);

        self.buffer.clear();
        self.transport.open(host, port)
    }

    /// Close the underlying transport.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport fails to release its resources.
    pub fn close(&mut self) -> Result<()> {
        info!("channel closing...");

        self.buffer.clear();
        self.transport.close()
    }

    /// Indicates if the underlying transport is alive.
    pub fn alive(&mut self) -> bool {
        self.transport.alive()
    }

    /// Read whatever the transport has right now. ANSI sequences are left in place, an escape can
    /// be split across reads; `expect` strips them from the buffer as a whole.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport read fails.
    pub fn read(&mut self) -> Result<Vec<u8>> {
        let b = self.transport.read()?;

        if !b.is_empty() {
            debug!(
                "channel read\n{}",
                str::from_utf8(&b).unwrap_or("failed decoding bytes, cannot log")
            );
        }

        Ok(b)
    }

    /// Append freshly read bytes to the unconsumed buffer, stripping ANSI sequences if configured.
    pub(super) fn absorb(
        &mut self,
        b: Vec<u8>,
    ) {
        self.buffer.extend(b);

        if self.args.strip_ansi && self.buffer.contains(&ANSI_ESCAPE_BYTE) {
            self.buffer = strip_ansi(&self.buffer);
        }
    }

    /// Bytes read but not consumed by any match yet.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}
