pub use error::{Error, Result};
pub use sync::{EnvSync, RuntimeEnv, ScriptEnv, SystemEnv, default_env_sync};

pub mod command;
pub mod dir;
pub mod env;
mod error;
mod sync;
