// SPDX-License-Identifier: MPL-2.0
//! Correlation-id request/response for metadata across the frame boundary.
//!
//! [`MetadataGateway::fetch`] posts an `image-search-metadata-request` and
//! waits for the response carrying the same `requestId`. Every request has a
//! timer; whichever of response or timer comes first removes the pending
//! entry, and the other finds nothing to do. Late responses are dropped.
//!
//! Answers and timeouts are cached by path; host-reported errors and unsent
//! requests are not. Concurrent fetches for a path that already has
//! a request in flight wait on that request instead of posting another.

use super::{Metadata, MetadataCache};
use crate::bridge::{FrameTransport, MetadataRequest, MetadataResponse, OutboundMessage};
use crate::config::DEFAULT_METADATA_TIMEOUT_SECS;
use crate::search::SearchResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

struct PendingRequest {
    path: String,
    waiters: Vec<oneshot::Sender<Metadata>>,
    timer: Option<AbortHandle>,
}

#[derive(Default)]
struct GatewayState {
    next_id: u64,
    pending: HashMap<String, PendingRequest>,
    /// Path to the id of its in-flight request.
    in_flight: HashMap<String, String>,
    cache: MetadataCache,
}

impl GatewayState {
    /// Removes a pending entry and its in-flight marker.
    fn take(&mut self, request_id: &str) -> Option<PendingRequest> {
        let pending = self.pending.remove(request_id)?;
        self.in_flight.remove(&pending.path);
        Some(pending)
    }
}

enum Lookup {
    Cached(Metadata),
    Waiting(oneshot::Receiver<Metadata>),
    Posted {
        request: MetadataRequest,
        receiver: oneshot::Receiver<Metadata>,
    },
}

/// Cheap to clone; clones share the pending table and the cache.
#[derive(Clone)]
pub struct MetadataGateway {
    state: Arc<Mutex<GatewayState>>,
    transport: Arc<dyn FrameTransport>,
    timeout: Duration,
}

impl std::fmt::Debug for MetadataGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataGateway")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl MetadataGateway {
    pub fn new(transport: Arc<dyn FrameTransport>) -> Self {
        Self::with_timeout(transport, Duration::from_secs(DEFAULT_METADATA_TIMEOUT_SECS))
    }

    pub fn with_timeout(transport: Arc<dyn FrameTransport>, timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(GatewayState::default())),
            transport,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock(&self) -> MutexGuard<'_, GatewayState> {
        // Critical sections never panic midway, so a poisoned table is intact.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached metadata for `path`, if a fetch for it has completed.
    pub fn cached(&self, path: &str) -> Option<Metadata> {
        self.lock().cache.get(path).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Metadata for `result`, from the cache or the host.
    ///
    /// Never fails: host errors, timeouts and transport failures all resolve
    /// to empty metadata. Must be called inside a tokio runtime.
    pub async fn fetch(&self, result: &SearchResult) -> Metadata {
        let receiver = match self.lookup(result) {
            Lookup::Cached(metadata) => return metadata,
            Lookup::Waiting(receiver) => receiver,
            Lookup::Posted { request, receiver } => {
                let request_id = request.request_id.clone();
                tracing::debug!(request_id = %request_id, path = %result.path, "requesting metadata");
                if let Err(err) = self.transport.post(OutboundMessage::MetadataRequest(request)) {
                    tracing::warn!(request_id = %request_id, error = %err, "metadata request not sent");
                    self.abandon(&request_id);
                }
                receiver
            }
        };
        receiver.await.unwrap_or_default()
    }

    fn lookup(&self, result: &SearchResult) -> Lookup {
        let mut state = self.lock();
        if let Some(metadata) = state.cache.get(&result.path) {
            return Lookup::Cached(metadata.clone());
        }

        let (sender, receiver) = oneshot::channel();
        if let Some(request_id) = state.in_flight.get(&result.path).cloned() {
            if let Some(pending) = state.pending.get_mut(&request_id) {
                pending.waiters.push(sender);
                return Lookup::Waiting(receiver);
            }
        }

        state.next_id += 1;
        let request_id = format!("req-{}", state.next_id);

        let gateway = self.clone();
        let timer_id = request_id.clone();
        let timeout = self.timeout;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            gateway.expire(&timer_id);
        });

        state.pending.insert(
            request_id.clone(),
            PendingRequest {
                path: result.path.clone(),
                waiters: vec![sender],
                timer: Some(timer.abort_handle()),
            },
        );
        state
            .in_flight
            .insert(result.path.clone(), request_id.clone());

        let location = result.location();
        Lookup::Posted {
            request: MetadataRequest {
                filename: location.filename,
                subfolder: location.subfolder,
                image_type: location.image_type,
                request_id,
            },
            receiver,
        }
    }

    /// Applies a host response. Returns `false` if nothing was waiting for it.
    pub fn handle_response(&self, response: MetadataResponse) -> bool {
        let mut state = self.lock();
        let Some(pending) = state.take(&response.request_id) else {
            tracing::debug!(request_id = %response.request_id, "ignoring response for unknown request");
            return false;
        };
        if let Some(timer) = &pending.timer {
            timer.abort();
        }

        // Host-reported errors resolve empty but stay uncached so a later open retries.
        let metadata = match response.error {
            Some(error) => {
                tracing::warn!(request_id = %response.request_id, path = %pending.path, %error, "host reported metadata error");
                Metadata::default()
            }
            None => {
                let metadata = Metadata::new(response.workflow, response.prompt);
                state.cache.insert_once(&pending.path, metadata.clone());
                metadata
            }
        };
        drop(state);

        resolve(pending.waiters, metadata);
        true
    }

    fn expire(&self, request_id: &str) {
        let mut state = self.lock();
        let Some(pending) = state.take(request_id) else {
            return;
        };
        tracing::warn!(
            request_id,
            path = %pending.path,
            timeout_ms = self.timeout.as_millis() as u64,
            "metadata request timed out"
        );
        state.cache.insert_once(&pending.path, Metadata::default());
        drop(state);

        resolve(pending.waiters, Metadata::default());
    }

    /// Resolves a request that never reached the host. Not cached, so a later
    /// fetch tries again.
    fn abandon(&self, request_id: &str) {
        let Some(pending) = self.lock().take(request_id) else {
            return;
        };
        if let Some(timer) = &pending.timer {
            timer.abort();
        }
        resolve(pending.waiters, Metadata::default());
    }
}

fn resolve(waiters: Vec<oneshot::Sender<Metadata>>, metadata: Metadata) {
    for waiter in waiters {
        // A dropped receiver only means the caller stopped waiting.
        let _ = waiter.send(metadata.clone());
    }
}
