// SPDX-License-Identifier: MPL-2.0
//! Finds the human-readable text inputs of a prompt graph.
//!
//! A prompt graph maps node ids to `{ "class_type": ..., "inputs": {...} }`.
//! Entries come out in the graph's insertion order.

use serde::Serialize;
use serde_json::Value;

/// Input-name fragments that mark a text field regardless of its length.
pub const TEXT_FIELD_HINTS: [&str; 7] = [
    "text",
    "prompt",
    "positive",
    "negative",
    "string",
    "caption",
    "description",
];

/// Values longer than this many UTF-16 code units are text fields.
pub const LONG_VALUE_CHARS: usize = 50;

/// One text input of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptEntry {
    pub node_id: String,
    pub class_type: String,
    pub input_name: String,
    pub value: String,
}

/// Whether the string input `name` holding `value` reads as prose.
pub fn is_text_field(name: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if value.contains('\n') || value.encode_utf16().count() > LONG_VALUE_CHARS {
        return true;
    }
    let name = name.to_lowercase();
    TEXT_FIELD_HINTS.iter().any(|hint| name.contains(hint))
}

/// Scans every node's string inputs. Non-object nodes are skipped.
pub fn extract_prompts(prompt: &Value) -> Vec<PromptEntry> {
    let Some(nodes) = prompt.as_object() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (node_id, node) in nodes {
        let Some(inputs) = node.get("inputs").and_then(Value::as_object) else {
            continue;
        };
        let class_type = node
            .get("class_type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        for (input_name, value) in inputs {
            let Some(text) = value.as_str() else {
                continue;
            };
            if is_text_field(input_name, text) {
                entries.push(PromptEntry {
                    node_id: node_id.clone(),
                    class_type: class_type.to_string(),
                    input_name: input_name.clone(),
                    value: text.to_string(),
                });
            }
        }
    }
    entries
}
