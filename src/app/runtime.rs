// SPDX-License-Identifier: MPL-2.0
//! Event loop connecting the view component to its host.
//!
//! The host speaks newline-delimited JSON: inbound frame messages arrive on
//! the reader, outbound ones leave on the writer, one per line. Effects run
//! as tokio tasks and report back through an internal channel, so the loop
//! itself only ever waits on three sources: host input, finished effects
//! and queued outbound messages.
//!
//! When a [`MetadataSource`] is configured, metadata requests are answered
//! in-process instead of being written out.

use super::clipboard::Clipboard;
use super::{Effect, ImageSearchView, Message};
use crate::bridge::{
    ChannelTransport, FrameTransport, InboundMessage, OutboundMessage, OutputEmitter,
    RenderMessage,
};
use crate::error::Result;
use crate::metadata::{MetadataGateway, MetadataSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

pub struct RuntimeOptions<S> {
    /// Host node that receives the selection.
    pub node_id: Option<String>,
    pub metadata_timeout: Duration,
    /// Answers metadata requests in-process when set.
    pub responder: Option<S>,
    pub clipboard: Arc<dyn Clipboard>,
}

/// Shared handles effects need once they leave the loop.
struct EffectContext {
    gateway: MetadataGateway,
    emitter: OutputEmitter,
    clipboard: Arc<dyn Clipboard>,
    events: mpsc::UnboundedSender<Message>,
}

impl EffectContext {
    fn perform_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&self, effect: Effect) {
        match effect {
            Effect::FetchMetadata(result) => {
                let gateway = self.gateway.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let metadata = gateway.fetch(&result).await;
                    let _ = events.send(Message::MetadataLoaded {
                        path: result.path,
                        metadata,
                    });
                });
            }
            Effect::EmitOutput(data) => {
                if let Err(err) = self.emitter.emit(data) {
                    tracing::warn!(error = %err, "selection not reported");
                }
            }
            Effect::CopyToClipboard(text) => {
                let clipboard = Arc::clone(&self.clipboard);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome =
                        tokio::task::spawn_blocking(move || clipboard.write_text(&text)).await;
                    let error = match outcome {
                        Ok(Ok(())) => None,
                        Ok(Err(err)) => Some(err.to_string()),
                        Err(err) => Some(err.to_string()),
                    };
                    let _ = events.send(Message::CopyFinished { error });
                });
            }
            Effect::DismissAfter { id, delay } => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(Message::DismissNotice { id });
                });
            }
        }
    }
}

/// Encodes the current view as a single render message.
pub fn render_once(view: &ImageSearchView) -> Result<String> {
    OutboundMessage::Render(RenderMessage {
        view: Box::new(view.view()),
    })
    .encode()
}

fn post_render(view: &ImageSearchView, transport: &dyn FrameTransport) {
    let message = OutboundMessage::Render(RenderMessage {
        view: Box::new(view.view()),
    });
    if let Err(err) = transport.post(message) {
        tracing::warn!(error = %err, "render dropped");
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, message: &OutboundMessage) -> Result<()> {
    let line = match message.encode() {
        Ok(line) => line,
        Err(err) => {
            tracing::warn!(kind = message.kind(), error = %err, "outbound message not encodable");
            return Ok(());
        }
    };
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Runs the view until the reader reaches end of input.
///
/// The view renders once at startup and again after every message it
/// handles. Only I/O errors on the writer or reader end the loop early.
pub async fn run<R, W, S>(
    mut view: ImageSearchView,
    options: RuntimeOptions<S>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: MetadataSource + Send + Sync + 'static,
{
    let (transport, mut outbound) = ChannelTransport::new();
    let transport: Arc<dyn FrameTransport> = Arc::new(transport);
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let ctx = EffectContext {
        gateway: MetadataGateway::with_timeout(Arc::clone(&transport), options.metadata_timeout),
        emitter: OutputEmitter::new(Arc::clone(&transport), options.node_id),
        clipboard: options.clipboard,
        events: events_tx,
    };
    let responder = options.responder.map(Arc::new);

    ctx.perform_all(view.init());
    post_render(&view, transport.as_ref());

    let mut lines = reader.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("host input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match InboundMessage::decode(&line) {
                    Ok(InboundMessage::MetadataResponse(response)) => {
                        let request_id = response.request_id.clone();
                        if !ctx.gateway.handle_response(response) {
                            tracing::debug!(%request_id, "ignoring response without a pending request");
                        }
                    }
                    Ok(InboundMessage::Event(event)) => {
                        ctx.perform_all(view.update(event.message));
                        post_render(&view, transport.as_ref());
                    }
                    Err(err) => tracing::debug!(error = %err, "dropping unrecognized host message"),
                }
            }
            Some(message) = events.recv() => {
                ctx.perform_all(view.update(message));
                post_render(&view, transport.as_ref());
            }
            Some(message) = outbound.recv() => match (message, &responder) {
                (OutboundMessage::MetadataRequest(request), Some(source)) => {
                    let source = Arc::clone(source);
                    let gateway = ctx.gateway.clone();
                    tokio::spawn(async move {
                        let response = source.answer(request).await;
                        gateway.handle_response(response);
                    });
                }
                (message, _) => write_line(&mut writer, &message).await?,
            },
        }
    }

    // Whatever was queued before input closed still goes out.
    while let Ok(message) = outbound.try_recv() {
        write_line(&mut writer, &message).await?;
    }
    writer.flush().await?;
    Ok(())
}
