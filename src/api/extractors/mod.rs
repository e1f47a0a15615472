//! Custom request extractors.

mod json_payload;
mod validated_json;

pub use json_payload::JsonPayload;
pub use validated_json::ValidatedJson;
