// SPDX-License-Identifier: MPL-2.0
//! Messages exchanged with the hosting frame.
//!
//! Every message is a JSON object discriminated by its `type` field. The view
//! only ever checks message *shape*: anything that does not decode into an
//! [`InboundMessage`] is dropped with a debug log, whatever its origin.
//!
//! # Outbound
//!
//! - `image-search-metadata-request` asks the host for an image's workflow
//!   and prompt
//! - `image-search-output` reports the current selection
//! - `image-search-render` carries a fresh view description
//!
//! # Inbound
//!
//! - `image-search-metadata-response` answers a metadata request
//! - `image-search-event` wraps a user interaction with the view

pub mod output;

pub use output::{OutputData, OutputEmitter, OutputMessage, OUTPUT_MARKER};

use crate::app::Message;
use crate::error::{Error, Result};
use crate::search::ImageType;
use crate::ui::ViewDescription;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

/// Request for the workflow and prompt embedded in one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRequest {
    pub filename: String,
    pub subfolder: String,
    pub image_type: ImageType,
    pub request_id: String,
}

/// Host answer to a [`MetadataRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub request_id: String,
    #[serde(default)]
    pub workflow: Option<Value>,
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderMessage {
    pub view: Box<ViewDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    pub message: Message,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "image-search-metadata-request")]
    MetadataRequest(MetadataRequest),
    #[serde(rename = "image-search-output")]
    Output(OutputMessage),
    #[serde(rename = "image-search-render")]
    Render(RenderMessage),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "image-search-metadata-response")]
    MetadataResponse(MetadataResponse),
    #[serde(rename = "image-search-event")]
    Event(EventMessage),
}

impl InboundMessage {
    /// Decodes one inbound frame message.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| Error::Transport(err.to_string()))
    }
}

impl OutboundMessage {
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::Transport(err.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::MetadataRequest(_) => "image-search-metadata-request",
            OutboundMessage::Output(_) => "image-search-output",
            OutboundMessage::Render(_) => "image-search-render",
        }
    }
}

/// Posts messages to the hosting frame.
///
/// Posting never blocks; delivery is the host's business.
pub trait FrameTransport: Send + Sync {
    fn post(&self, message: OutboundMessage) -> Result<()>;
}

/// Transport that hands messages to a channel drained by the runtime.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl FrameTransport for ChannelTransport {
    fn post(&self, message: OutboundMessage) -> Result<()> {
        let kind = message.kind();
        self.sender
            .send(message)
            .map_err(|_| Error::Transport(format!("frame closed, dropped {kind}")))
    }
}
