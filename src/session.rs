mod builder;
mod execute;
mod login;
mod privilege;
#[allow(clippy::module_inception)]
mod session;
mod state;
mod variant;

pub use builder::{
    create_session,
    Builder,
};
pub use execute::Options as ExecuteOptions;
pub use session::{
    Args,
    Session,
    TraceSink,
    DEFAULT_SETTLE_DELAY,
    DEFAULT_TIMEOUT,
};
pub use state::PrivilegeState;
pub use variant::{
    ConnectionType,
    Variant,
};
