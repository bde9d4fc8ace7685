use super::Channel;
use crate::errors::Result;

impl Channel {
    /// Write `b` bytes to the device as-is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport write fails.
    pub fn write(
        &mut self,
        b: &[u8],
    ) -> Result<()> {
        self.transport.write(b)
    }

    /// Write `b` followed by the return character, as a single transport write.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport write fails.
    pub fn write_and_return(
        &mut self,
        b: &[u8],
    ) -> Result<()> {
        let mut line = Vec::with_capacity(b.len() + self.args.return_char.len());
        line.extend_from_slice(b);
        line.extend_from_slice(self.args.return_char.as_bytes());

        self.write(&line)
    }

    /// Write just the return character.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport write fails.
    pub fn write_return(&mut self) -> Result<()> {
        self.write_and_return(b"")
    }
}
