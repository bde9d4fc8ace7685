#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![warn(missing_docs)]
#![warn(clippy::multiple_crate_versions)]
// restriction is wild, but some good things for consistency in there, rather would allow things
// explicitly so any new lints pop up and annoy if they get added and then can decide to keep or
// ditch them!
#![warn(clippy::restriction)]
#![allow(clippy::implicit_return)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::question_mark_used)]
#![allow(clippy::separated_literal_suffix)]
#![allow(clippy::missing_inline_in_public_items)]
#![allow(clippy::exhaustive_enums)]
#![allow(clippy::exhaustive_structs)]
#![allow(clippy::self_named_module_files)]
#![allow(clippy::multiple_inherent_impl)]
#![allow(clippy::partial_pub_fields)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![allow(clippy::std_instead_of_core)]
#![allow(clippy::multiple_unsafe_ops_per_block)]
#![allow(clippy::single_char_lifetime_names)]
#![allow(clippy::missing_trait_methods)]
#![allow(clippy::as_conversions)]
#![allow(clippy::shadow_unrelated)]
#![allow(clippy::unwrap_in_result)]
#![allow(clippy::pub_use)]
#![allow(clippy::arithmetic_side_effects)]

//! netdevicers drives the login, enable and command dialogs of network devices (routers,
//! switches, firewalls) over telnet or ssh. Vendor differences live in data: each device family is
//! a set of command and prompt overrides laid over common defaults.

/// Channel wraps a transport and scans its output for prompts. Sessions are the only expected user.
pub mod channel;

/// Netdevicers errors.
pub mod errors;

/// Device profiles: the named commands and prompts of each device family, and the registry that
/// builds them from the embedded yaml definitions.
pub mod profile;

/// The negotiation engine -- sessions, their builder and the login/enable/execute dialogs.
pub mod session;

/// Transport module holds the base transport and any transport implementations.
pub mod transport {
    /// Base transport module providing trait that all transports must implement.
    pub mod base;

    /// Replays canned device output, for tests and offline development.
    pub mod scripted;

    /// The "system" (/bin/ssh under a pty) transport implementation.
    pub mod system;

    /// Telnet over a plain tcp socket.
    pub mod telnet;
}

/// Netdevicers utilities.
pub(crate) mod util {
    /// Simple bytes helper functions.
    pub(crate) mod bytes;

    /// Spawning a child process on a pseudo terminal.
    pub(crate) mod pty;
}

pub use errors::{
    Error,
    Result,
};
pub use session::{
    Builder as SessionBuilder,
    Session,
};
