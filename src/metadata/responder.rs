// SPDX-License-Identifier: MPL-2.0
//! Host-side answers to metadata requests.
//!
//! The host reads the PNG text chunks through its own HTTP endpoint:
//! `GET <base><endpoint>?filename=&subfolder=&type=`. Whatever goes wrong,
//! the responder still produces a response (with `workflow` and `prompt`
//! null and `error` set) so the view is never left waiting for its timeout.

use crate::bridge::{MetadataRequest, MetadataResponse};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can answer a metadata request.
pub trait MetadataSource {
    fn answer(&self, request: MetadataRequest) -> impl Future<Output = MetadataResponse> + Send;
}

/// Body returned by the host endpoint.
///
/// `workflow` is a string when the embedded chunk is not valid JSON.
#[derive(Debug, Default, Deserialize)]
struct EndpointBody {
    #[serde(default)]
    workflow: Option<Value>,
    #[serde(default)]
    prompt: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    metadata_keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HostResponder {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl HostResponder {
    pub fn new(base_url: &str, endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn metadata_url(&self, request: &MetadataRequest) -> String {
        format!(
            "{}{}?filename={}&subfolder={}&type={}",
            self.base_url,
            self.endpoint,
            urlencoding::encode(&request.filename),
            urlencoding::encode(&request.subfolder),
            request.image_type.as_str(),
        )
    }

    async fn query(&self, request: &MetadataRequest) -> Result<EndpointBody> {
        let url = self.metadata_url(request);
        tracing::debug!(%url, request_id = %request.request_id, "querying host metadata");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.json::<EndpointBody>().await;
        if !status.is_success() {
            let detail = body
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());
            return Err(Error::Http(detail));
        }
        let body = body?;
        tracing::debug!(
            request_id = %request.request_id,
            keys = ?body.metadata_keys,
            "host metadata received"
        );
        Ok(body)
    }
}

impl MetadataSource for HostResponder {
    async fn answer(&self, request: MetadataRequest) -> MetadataResponse {
        match self.query(&request).await {
            Ok(body) => MetadataResponse {
                request_id: request.request_id,
                workflow: body.workflow,
                prompt: body.prompt,
                error: body.error,
            },
            Err(err) => {
                tracing::warn!(
                    request_id = %request.request_id,
                    filename = %request.filename,
                    error = %err,
                    "metadata lookup failed"
                );
                MetadataResponse {
                    request_id: request.request_id,
                    workflow: None,
                    prompt: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
