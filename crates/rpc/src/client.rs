// HyPy - Hydra Chain RPC Toolkit
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! JSON-RPC 2.0 transport over HTTP
//!
//! [`RpcClient`] posts one request per [`RpcClient::call`], classifies failures
//! into transport and remote errors and wraps successful bodies in an
//! [`RpcResult`]. The underlying HTTP client is created on first use and then
//! reused for the lifetime of the `RpcClient`.

use crate::{
    error::{RemoteError, RpcError, UrlError},
    result::RpcResult,
};
use once_cell::sync::OnceCell;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Url,
};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, trace};

/// Protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id; calls are strictly sequential so one id is enough
pub const REQUEST_ID: u64 = 1;

/// Resource kind used for per-wallet endpoints
pub const WALLET_RESOURCE: &str = "wallet";

/// Decoder applied to the body of successful responses
pub type ResponseDecoder = Arc<dyn Fn(&str) -> Result<Value, RpcError> + Send + Sync>;

/// A JSON-RPC 2.0 request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest<'a> {
    /// Request id
    pub id: u64,
    /// Always `"2.0"`
    pub jsonrpc: &'static str,
    /// Method name
    pub method: &'a str,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl<'a> RpcRequest<'a> {
    /// Build a request, dropping parameters that were not supplied.
    ///
    /// The remaining parameters keep their relative order.
    pub fn new<I>(method: &'a str, params: I) -> Self
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        Self {
            id: REQUEST_ID,
            jsonrpc: JSONRPC_VERSION,
            method,
            params: params.into_iter().flatten().collect(),
        }
    }
}

/// Decode a body as JSON, falling back to the raw text as a JSON string.
///
/// Plain-text pages (e.g. from a reverse proxy) stay usable as opaque results.
pub fn lenient_decode(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Builder for [`RpcClient`]
#[derive(Clone)]
pub struct RpcClientBuilder {
    url: Url,
    resource: Option<(String, String)>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    decoder: Option<ResponseDecoder>,
}

impl RpcClientBuilder {
    /// Start from a fully resolved base URL
    pub fn new(url: Url) -> Self {
        Self { url, resource: None, headers: HeaderMap::new(), timeout: None, decoder: None }
    }

    /// Scope every call to `<base path>/<kind>/<name>`
    pub fn resource(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.resource = Some((kind.into(), name.into()));
        self
    }

    /// Scope every call to the named wallet
    pub fn wallet(self, name: impl Into<String>) -> Self {
        self.resource(WALLET_RESOURCE, name)
    }

    /// Like [`Self::wallet`], leaving the builder untouched for `None`
    pub fn maybe_wallet(self, name: Option<impl Into<String>>) -> Self {
        match name {
            Some(name) => self.wallet(name),
            None => self,
        }
    }

    /// Send an extra header with every request
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Total timeout for each HTTP round trip
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace [`lenient_decode`] for successful responses
    pub fn decoder<F>(mut self, decoder: F) -> Self
    where
        F: Fn(&str) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.decoder = Some(Arc::new(decoder));
        self
    }

    /// Build the client. No connection is made until the first call.
    pub fn build(self) -> Result<RpcClient, RpcError> {
        let mut endpoint = self.url.clone();

        if let Some((kind, name)) = &self.resource {
            endpoint
                .path_segments_mut()
                .map_err(|_| UrlError::NotABase(redact(&self.url)))?
                .pop_if_empty()
                .push(kind)
                .push(name);
        }

        Ok(RpcClient {
            display: redact(&endpoint),
            url: self.url,
            endpoint,
            headers: self.headers,
            timeout: self.timeout,
            decoder: self.decoder,
            http: OnceCell::new(),
        })
    }
}

/// JSON-RPC client bound to one node endpoint.
///
/// Calls are sequential per instance; share it behind your own lock, or use one
/// client per task, when calls need to run concurrently.
pub struct RpcClient {
    url: Url,
    endpoint: Url,
    display: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    decoder: Option<ResponseDecoder>,
    http: OnceCell<reqwest::Client>,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.display)
            .field("timeout", &self.timeout)
            .field("connected", &self.has_session())
            .finish()
    }
}

impl RpcClient {
    /// Client for `url` with default settings
    pub fn new(url: Url) -> Result<Self, RpcError> {
        Self::builder(url).build()
    }

    /// Start configuring a client
    pub fn builder(url: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(url)
    }

    /// Base URL the client was built with
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL requests are posted to (base URL plus any resource path)
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Whether the HTTP session has been created yet
    pub fn has_session(&self) -> bool {
        self.http.get().is_some()
    }

    fn session(&self) -> Result<&reqwest::Client, RpcError> {
        self.http.get_or_try_init(|| {
            debug!(endpoint = %self.display, "Creating HTTP session");
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().map_err(RpcError::Transport)
        })
    }

    /// Call `method` with positional parameters.
    ///
    /// `None` entries are omitted from the request. Fails with
    /// [`RpcError::Transport`] when no response arrives and with
    /// [`RpcError::Remote`] on a non-success status or a non-null `error`.
    pub async fn call<I>(&self, method: &str, params: I) -> Result<RpcResult, RpcError>
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        let request = RpcRequest::new(method, params);
        debug!(endpoint = %self.display, method, params = ?request.params, "POST");

        let response = self
            .session()?
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        trace!(%status, body = %text, "Response");

        if !status.is_success() {
            let body = lenient_decode(&text);
            let err = RemoteError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            );
            debug!(method, code = err.code, message = %err.message, "Call failed with HTTP {status}");
            return Err(err.into());
        }

        let body = match &self.decoder {
            Some(decoder) => decoder(&text)?,
            None => lenient_decode(&text),
        };

        if let Some(error) = body.get("error").filter(|error| !error.is_null()) {
            let err = RemoteError::from_error_value(error, Some(status.as_u16()));
            debug!(method, code = err.code, message = %err.message, "Node returned an error");
            return Err(err.into());
        }

        Ok(RpcResult::from_json(body))
    }
}

/// URL without credentials, for logs and error messages
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.to_string()
}
