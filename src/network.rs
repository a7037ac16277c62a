//! The network-requestor capability adapters are built against.
//!
//! An [`HttpRequestor`] is an async HTTP client already bound to one
//! provider's base URL, with account credentials applied by the injecting
//! layer. Adapters receive it ready-made, reuse it across calls, and never
//! manage its lifecycle; per-call timeout and cancellation belong to the
//! underlying client.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{AddonError, AddonResult};

/// Async HTTP client scoped to a provider base URL.
#[derive(Debug, Clone)]
pub struct HttpRequestor {
    client: Client,
    base_url: Url,
}

impl HttpRequestor {
    /// A malformed base URL is a configuration error, surfaced here rather
    /// than on first use.
    pub fn new(client: Client, base_url: &str) -> AddonResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| AddonError::Config(format!("invalid base url {base_url:?}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AddonError::Config(format!(
                "invalid base url {base_url:?}: cannot be a base"
            )));
        }
        // relative paths join against the base as a directory
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn join(&self, relative_path: &str) -> AddonResult<Url> {
        let url = self
            .base_url
            .join(relative_path)
            .map_err(|err| AddonError::Config(format!("invalid path {relative_path:?}: {err}")))?;
        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(AddonError::Config(format!(
                "relative path {relative_path:?} may not alter the base url"
            )));
        }
        Ok(url)
    }

    /// GET `relative_path` with an order-preserving query sequence; repeated
    /// keys are sent as-is.
    pub async fn get(
        &self,
        relative_path: &str,
        query: &[(&str, &str)],
    ) -> AddonResult<HttpResponse> {
        let url = self.join(relative_path)?;
        debug!(%url, "GET");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Ok(HttpResponse { inner: response })
    }

    /// POST `relative_path` with a JSON body.
    pub async fn post_json(
        &self,
        relative_path: &str,
        body: &serde_json::Value,
    ) -> AddonResult<HttpResponse> {
        let url = self.join(relative_path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Ok(HttpResponse { inner: response })
    }
}

/// One upstream response. Body extraction consumes the handle, so a response
/// is fully read exactly once.
#[derive(Debug)]
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Map a non-success status onto the error taxonomy: 404 becomes
    /// [`AddonError::NotFound`], everything else keeps status and body for
    /// diagnostics.
    pub async fn classify_status(self) -> AddonResult<Self> {
        let status = self.inner.status();
        if status.is_success() {
            return Ok(self);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AddonError::NotFound {
                status: status.as_u16(),
            });
        }
        let body = self.inner.text().await.unwrap_or_default();
        Err(AddonError::Upstream {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn json_body<T: DeserializeOwned>(self) -> AddonResult<T> {
        Ok(self.inner.json::<T>().await?)
    }

    pub async fn text_body(self) -> AddonResult<String> {
        Ok(self.inner.text().await?)
    }
}
