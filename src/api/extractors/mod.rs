//! Custom request extractors.

mod deferred_json;
mod path_id;
mod validated_json;

pub use deferred_json::DeferredJson;
pub use path_id::PathId;
pub use validated_json::ValidatedJson;
