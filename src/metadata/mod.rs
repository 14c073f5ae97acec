// SPDX-License-Identifier: MPL-2.0
//! Per-image workflow and prompt metadata.
//!
//! The view cannot read image files itself. It asks the host through the
//! [`gateway`], the host answers with [`responder`], and the results are kept
//! in a [`cache`] for the rest of the session.

pub mod cache;
pub mod gateway;
pub mod prompts;
pub mod responder;

pub use cache::MetadataCache;
pub use gateway::MetadataGateway;
pub use prompts::{extract_prompts, is_text_field, PromptEntry};
pub use responder::{HostResponder, MetadataSource};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workflow and prompt embedded in one image. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub workflow: Option<Value>,
    #[serde(default)]
    pub prompt: Option<Value>,
}

impl Metadata {
    pub fn new(workflow: Option<Value>, prompt: Option<Value>) -> Self {
        // A JSON `null` means the same as a missing field.
        Self {
            workflow: workflow.filter(|v| !v.is_null()),
            prompt: prompt.filter(|v| !v.is_null()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.workflow.is_none() && self.prompt.is_none()
    }

    /// Text fields of the prompt graph, empty when there is no prompt.
    pub fn prompt_entries(&self) -> Vec<PromptEntry> {
        self.prompt.as_ref().map(extract_prompts).unwrap_or_default()
    }
}
