mod args;
#[allow(clippy::module_inception)]
mod channel;
mod constants;
mod expect;
mod patterns;
mod util;
mod write;

pub use args::Args;
pub use channel::Channel;
pub use constants::{
    DEFAULT_READ_DELAY,
    DEFAULT_RETURN_CHAR,
};
pub use expect::MatchOutcome;
pub use util::strip_ansi;
