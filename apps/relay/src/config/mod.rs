pub mod relay;

pub use relay::{auth_policy_from_env, LogFormat, RelayConfig};
