use super::constants::{
    DEFAULT_READ_DELAY,
    DEFAULT_RETURN_CHAR,
};
use core::time::Duration;

/// A struct to hold args/settings for a `Channel` object.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct Args {
    /// Appended to input by `write_and_return`.
    pub return_char: String,
    /// Delay between reads of the underlying transport when nothing arrived.
    pub read_delay: Duration,
    /// Strip ANSI escape sequences out of device output before matching.
    pub strip_ansi: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            return_char: DEFAULT_RETURN_CHAR.to_owned(),
            read_delay: DEFAULT_READ_DELAY,
            strip_ansi: true,
        }
    }
}
