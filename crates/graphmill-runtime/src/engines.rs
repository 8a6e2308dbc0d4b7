//! Engine variants.

pub mod ml;
pub mod rule;
pub mod stub;

pub use ml::MlEngine;
pub use rule::RuleEngine;
pub use stub::LlmStubEngine;

use serde_json::{Map, Value};

/// Remove and return the object stored under `key`, or an empty one. Used
/// by decorator engines to extend nested metadata objects in place.
pub(crate) fn take_object(metadata: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match metadata.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
