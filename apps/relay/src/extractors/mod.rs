pub mod caller;
pub mod validated_json;

pub use caller::Caller;
pub use validated_json::ValidatedJson;
