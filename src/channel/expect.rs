use super::Channel;
use crate::errors::{
    Error,
    Result,
};
use crate::profile::Prompt;
use chrono::{
    Duration as ChronoDuration,
    Utc,
};
use core::time::Duration;
use log::debug;
use std::thread;

/// What an `expect` call saw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A prompt matched.
    Matched {
        /// Position of the matching prompt in the list handed to `expect`.
        index: usize,
        /// Profile key of the matching prompt.
        key: String,
        /// The text the prompt matched.
        matched: String,
        /// Everything consumed, up to and including the match.
        consumed: String,
    },
    /// The timeout elapsed first.
    NoMatch {
        /// Everything read while waiting.
        consumed: String,
    },
}

impl MatchOutcome {
    /// Returns true for a `Matched` outcome.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Everything consumed by this outcome.
    #[must_use]
    pub fn consumed(&self) -> &str {
        match self {
            Self::Matched { consumed, .. } | Self::NoMatch { consumed } => consumed,
        }
    }
}

impl Channel {
    /// Check the unconsumed buffer against `prompts`. The first prompt *in list order* that
    /// matches anywhere wins, and the buffer up to the end of its match is consumed.
    fn scan(
        &mut self,
        prompts: &[Prompt],
    ) -> Option<MatchOutcome> {
        prompts.iter().enumerate().find_map(|(index, prompt)| {
            let found = prompt.find(&self.buffer)?;
            let (start, end) = (found.start(), found.end());

            let consumed: Vec<u8> = self.buffer.drain(..end).collect();

            Some(MatchOutcome::Matched {
                index,
                key: prompt.key().to_owned(),
                matched: String::from_utf8_lossy(consumed.get(start..).unwrap_or_default())
                    .into_owned(),
                consumed: String::from_utf8_lossy(&consumed).into_owned(),
            })
        })
    }

    /// Read until one of `prompts` matches or `timeout` elapses. Output read past the end of a
    /// match stays buffered for the next call. On timeout everything buffered is consumed and
    /// returned in the `NoMatch` outcome.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the transport read fails.
    pub fn expect(
        &mut self,
        prompts: &[Prompt],
        timeout: Duration,
    ) -> Result<MatchOutcome> {
        let deadline = Utc::now()
            + ChronoDuration::from_std(timeout).map_err(|err| Error::Transport {
                details: format!("failed casting timeout to chrono duration, error: {err}"),
            })?;

        loop {
            if let Some(outcome) = self.scan(prompts) {
                if let MatchOutcome::Matched { key, matched, .. } = &outcome {
                    debug!("matched prompt '{}' on {:?}", key, matched);
                }

                return Ok(outcome);
            }

            if Utc::now() >= deadline {
                debug!("no prompt matched within {:?}", timeout);

                let consumed = core::mem::take(&mut self.buffer);

                return Ok(MatchOutcome::NoMatch {
                    consumed: String::from_utf8_lossy(&consumed).into_owned(),
                });
            }

            let nb = self.read()?;

            if nb.is_empty() {
                thread::sleep(self.args.read_delay);

                continue;
            }

            self.absorb(nb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Args;
    use crate::transport::base::Transport;
    use crate::transport::scripted::Scripted;
    use std::collections::VecDeque;

    fn prompt(
        key: &str,
        pattern: &str,
    ) -> Prompt {
        Prompt::new(key, pattern).unwrap()
    }

    fn opened(chunks: &[&str]) -> Channel {
        let mut channel = Channel::new(Args::default(), Scripted::new(chunks.iter().copied()));

        channel.open("r1", 23).unwrap();

        channel
    }

    #[test]
    fn list_order_beats_position_in_buffer() {
        let mut channel = opened(&["router>\nPassword: "]);

        let outcome = channel
            .expect(
                &[
                    prompt("password", r"[Pp]assword:\s*$"),
                    prompt("command", r"(?m)[\w.-]+>"),
                ],
                Duration::from_millis(50),
            )
            .unwrap();

        assert!(matches!(
            outcome,
            MatchOutcome::Matched { index: 0, ref key, ref matched, .. }
                if key == "password" && matched == "Password: "
        ));
        assert!(channel.pending().is_empty());
    }

    #[test]
    fn leftover_output_carries_into_next_call() {
        let mut channel = opened(&["first> second> "]);
        let prompts = [prompt("command", r"\w+> ")];

        let first = channel.expect(&prompts, Duration::from_millis(50)).unwrap();
        assert_eq!(first.consumed(), "first> ");
        assert_eq!(channel.pending(), b"second> ");

        let second = channel.expect(&prompts, Duration::from_millis(50)).unwrap();
        assert_eq!(second.consumed(), "second> ");
    }

    #[test]
    fn timeout_consumes_everything() {
        let mut channel = opened(&["% booting..."]);

        let outcome = channel
            .expect(&[prompt("command", r"#\s*$")], Duration::from_millis(20))
            .unwrap();

        assert_eq!(
            outcome,
            MatchOutcome::NoMatch {
                consumed: String::from("% booting...")
            }
        );
        assert!(channel.pending().is_empty());
    }

    #[test]
    fn empty_prompt_never_matches() {
        let mut channel = opened(&["router#"]);

        let outcome = channel
            .expect(&[Prompt::unmatched("logout")], Duration::from_millis(10))
            .unwrap();

        assert!(!outcome.is_match());
    }

    #[test]
    fn ansi_is_stripped_before_matching() {
        let mut channel = opened(&["\x1b[1mrouter\x1b[0m#"]);

        let outcome = channel
            .expect(&[prompt("command", r"^router#$")], Duration::from_millis(50))
            .unwrap();

        assert!(outcome.is_match());
    }

    /// Hands out one chunk per read, regardless of writes.
    struct Trickle(VecDeque<&'static str>);

    impl Transport for Trickle {
        fn open(
            &mut self,
            _host: &str,
            _port: u16,
        ) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }

        fn alive(&mut self) -> bool {
            true
        }

        fn read(&mut self) -> Result<Vec<u8>> {
            Ok(self.0.pop_front().map(|c| c.as_bytes().to_vec()).unwrap_or_default())
        }

        fn write(
            &mut self,
            _b: &[u8],
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn ansi_split_across_reads_is_stripped() {
        let mut channel = Channel::new(
            Args::default(),
            Trickle(VecDeque::from(["show clock\r\n10:02 UTC\r\nrouter#\x1b[", "K"])),
        );

        channel.open("r1", 23).unwrap();

        let outcome = channel
            .expect(&[prompt("command", r"router#$")], Duration::from_millis(50))
            .unwrap();

        assert_eq!(outcome.consumed(), "show clock\r\n10:02 UTC\r\nrouter#");
        assert!(channel.pending().is_empty());
    }

    #[test]
    fn write_and_return_is_one_write() {
        let scripted = Scripted::new(["router#"]);
        let transcript = scripted.transcript();
        let mut channel = Channel::new(
            Args {
                return_char: String::from("\r\n"),
                ..Args::default()
            },
            scripted,
        );

        channel.open("r1", 23).unwrap();
        channel.write_and_return(b"show clock").unwrap();
        channel.write_return().unwrap();

        assert_eq!(transcript.writes(), ["show clock\r\n", "\r\n"]);
        assert!(channel.close().is_ok());

        let mut closed = Scripted::default();
        assert!(!closed.alive());
    }
}
