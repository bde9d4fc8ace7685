extern crate alloc;
use crate::errors::{
    Error,
    Result,
};
use crate::transport::base::Transport;
use alloc::sync::Arc;
use log::trace;
use std::collections::VecDeque;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

#[derive(Debug, Default)]
struct Record {
    opened: Vec<(String, u16)>,
    writes: Vec<Vec<u8>>,
    closes: usize,
}

/// A shared view of everything a `Scripted` transport was asked to do. Clone it before handing the
/// transport to a session and inspect it afterwards.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    record: Arc<Mutex<Record>>,
}

impl Transcript {
    fn lock(&self) -> MutexGuard<'_, Record> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every write, in order, decoded lossily.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.lock()
            .writes
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }

    /// Number of write calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    /// Every (host, port) the transport was opened with.
    #[must_use]
    pub fn opened(&self) -> Vec<(String, u16)> {
        self.lock().opened.clone()
    }

    /// Number of close calls.
    #[must_use]
    pub fn closes(&self) -> usize {
        self.lock().closes
    }
}

/// `Scripted` replays canned device output. The first chunk becomes readable when the transport is
/// opened and each write releases the next one; an empty chunk stands for a device that stays
/// silent. Once the script runs out, reads return nothing.
#[derive(Debug, Default)]
pub struct Scripted {
    chunks: VecDeque<Vec<u8>>,
    pending: Vec<u8>,
    open: bool,
    transcript: Transcript,
}

impl Scripted {
    /// Returns a new `Scripted` transport replaying `chunks`.
    pub fn new<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            ..Self::default()
        }
    }

    /// A handle on what this transport records.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    fn release(&mut self) {
        if let Some(chunk) = self.chunks.pop_front() {
            self.pending.extend(chunk);
        }
    }
}

impl Transport for Scripted {
    fn open(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<()> {
        self.transcript
            .lock()
            .opened
            .push((host.to_owned(), port));
        self.open = true;
        self.release();

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.transcript.lock().closes += 1;
        self.open = false;

        Ok(())
    }

    fn alive(&mut self) -> bool {
        self.open
    }

    fn read(&mut self) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::Transport {
                details: String::from("attempting to read from closed scripted transport"),
            });
        }

        Ok(core::mem::take(&mut self.pending))
    }

    fn write(
        &mut self,
        b: &[u8],
    ) -> Result<()> {
        if !self.open {
            return Err(Error::Transport {
                details: String::from("attempting to write to closed scripted transport"),
            });
        }

        trace!("scripted transport write {:?}", String::from_utf8_lossy(b));

        self.transcript.lock().writes.push(b.to_vec());
        self.release();

        Ok(())
    }
}
