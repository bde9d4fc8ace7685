mod definition;
mod device;
/// Names of the command and prompt keys the session engine looks up.
pub mod keys;
mod prompt;
mod registry;

pub use definition::{
    Definitions,
    Layer,
    BUILTIN_PROFILES_YAML,
};
pub use device::DeviceProfile;
pub use prompt::Prompt;
pub use registry::{
    create_profile,
    ProfileRegistry,
};
