pub mod app_state;
pub mod auth_policy;

pub use app_state::AppState;
pub use auth_policy::{AuthPolicy, JwtPolicy};
