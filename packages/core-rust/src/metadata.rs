//! Function metadata: the declared binding shape of a registered function.
//!
//! The host registers each function with a JSON binding declaration. The
//! worker only needs two facts out of it: which binding is the trigger and
//! which out-binding carries the HTTP response. Metadata is created once per
//! function id and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Direction of a declared binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingDirection {
    In,
    Out,
    Inout,
}

/// A single binding declaration from the host's function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub binding_type: String,
    pub direction: BindingDirection,
}

/// Immutable per-function metadata, keyed by function id in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    pub name: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub bindings: Vec<BindingInfo>,
}

impl FunctionMetadata {
    /// The name of the trigger binding: the first in-binding whose type ends
    /// in `Trigger` (`httpTrigger`, `timerTrigger`, ...).
    #[must_use]
    pub fn trigger_name(&self) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| {
                binding.direction == BindingDirection::In
                    && binding.binding_type.ends_with("Trigger")
            })
            .map(|binding| binding.name.as_str())
    }

    /// The name of the HTTP output binding, if one is declared.
    #[must_use]
    pub fn http_output_name(&self) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| {
                binding.direction == BindingDirection::Out && binding.binding_type == "http"
            })
            .map(|binding| binding.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_function() -> FunctionMetadata {
        serde_json::from_value(serde_json::json!({
            "name": "graphql",
            "directory": "/home/site/wwwroot/graphql",
            "bindings": [
                { "name": "req", "type": "httpTrigger", "direction": "in" },
                { "name": "res", "type": "http", "direction": "out" }
            ]
        }))
        .expect("deserialize metadata")
    }

    #[test]
    fn deserializes_from_host_json() {
        let metadata = http_function();
        assert_eq!(metadata.name, "graphql");
        assert_eq!(metadata.bindings.len(), 2);
        assert_eq!(metadata.bindings[0].binding_type, "httpTrigger");
        assert_eq!(metadata.bindings[1].direction, BindingDirection::Out);
    }

    #[test]
    fn trigger_name_finds_the_in_trigger_binding() {
        assert_eq!(http_function().trigger_name(), Some("req"));
    }

    #[test]
    fn http_output_name_finds_the_out_http_binding() {
        assert_eq!(http_function().http_output_name(), Some("res"));
    }

    #[test]
    fn non_trigger_in_bindings_are_skipped() {
        let metadata: FunctionMetadata = serde_json::from_value(serde_json::json!({
            "name": "fn",
            "bindings": [
                { "name": "blob", "type": "blob", "direction": "in" },
                { "name": "timer", "type": "timerTrigger", "direction": "in" }
            ]
        }))
        .unwrap();
        assert_eq!(metadata.trigger_name(), Some("timer"));
        assert_eq!(metadata.http_output_name(), None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let metadata: FunctionMetadata =
            serde_json::from_value(serde_json::json!({ "name": "bare" })).unwrap();
        assert!(metadata.directory.is_empty());
        assert!(metadata.bindings.is_empty());
        assert_eq!(metadata.trigger_name(), None);
    }
}
