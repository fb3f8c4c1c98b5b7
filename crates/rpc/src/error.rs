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

//! Error taxonomy for RPC calls, envelope access and endpoint resolution

use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::RpcClient`] and [`crate::NodeRpc`].
///
/// Each variant is a distinct terminal state of one invocation. Nothing in this
/// crate retries, prints or exits; the caller decides how to present them.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Network or connection failure before a response was received
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node rejected the call, or answered with a non-success HTTP status
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A parameter could not be coerced or does not fit the method signature
    #[error("invalid parameter `{token}`: {reason}")]
    Parameter {
        /// The offending raw token (or parameter name)
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// The method is not part of the dispatch table
    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    /// A custom response decoder rejected the body
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The endpoint could not be resolved
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Field access on a result envelope failed
    #[error(transparent)]
    Result(#[from] ResultError),
}

impl RpcError {
    /// Shorthand for a [`RpcError::Parameter`]
    pub fn parameter(token: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parameter { token: token.into(), reason: reason.to_string() }
    }

    /// Whether the failure happened locally, before any request was sent
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Parameter { .. } | Self::UnknownMethod(_) | Self::Url(_))
    }

    /// The structured remote error, if this is one
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}

/// JSON-RPC "internal error" code, used when the node's error payload is malformed
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC error object returned by the node or synthesized from an HTTP failure
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("error {code}: {message}")]
pub struct RemoteError {
    /// JSON-RPC error code (or the HTTP status code when the body carried none)
    pub code: i64,
    /// Human readable message
    pub message: String,
    /// Optional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// HTTP status of the response that carried the error
    #[serde(skip)]
    pub status: Option<u16>,
}

impl RemoteError {
    /// Build from a JSON-RPC `error` object.
    ///
    /// Returns `None` unless `error` is an object with an integer `code`.
    pub fn from_error_object(error: &Value, status: Option<u16>) -> Option<Self> {
        let code = error.get("code")?.as_i64()?;
        let message = match error.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let data = error.get("data").filter(|data| !data.is_null()).cloned();

        Some(Self { code, message, data, status })
    }

    /// Build from any non-null `error` member.
    ///
    /// Malformed error objects become [`INTERNAL_ERROR`] with the payload as message.
    pub fn from_error_value(error: &Value, status: Option<u16>) -> Self {
        Self::from_error_object(error, status).unwrap_or_else(|| Self {
            code: INTERNAL_ERROR,
            message: match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            },
            data: None,
            status,
        })
    }

    /// Build from a failed HTTP response.
    ///
    /// The body's `error` object wins when it is well formed; otherwise the
    /// status code and the body text are used.
    pub fn from_response(status: u16, reason: &str, body: &Value) -> Self {
        if let Some(err) = body.get("error").and_then(|err| Self::from_error_object(err, Some(status)))
        {
            return err;
        }

        let message = match body {
            Value::String(text) if !text.trim().is_empty() => text.trim().to_string(),
            Value::Null | Value::String(_) => reason.to_string(),
            other => other.to_string(),
        };

        Self { code: i64::from(status), message, data: None, status: Some(status) }
    }

    /// JSON form printed by the CLI when a call fails
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status,
            "error": self,
        })
    }
}

/// Failures when reading fields out of a [`crate::RpcResult`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    /// Field access on something that is not a JSON object
    #[error("cannot read field `{field}` of a {kind} value")]
    NotAnObject {
        /// Requested field
        field: String,
        /// JSON kind of the value that was accessed
        kind: &'static str,
    },

    /// The object has no such field
    #[error("field `{0}` not found")]
    FieldNotFound(String),
}

/// Failures while resolving a connection url into a node URL
#[derive(Debug, Error)]
pub enum UrlError {
    /// The connection url could not be parsed
    #[error("invalid rpc url `{url}`: {reason}")]
    Parse {
        /// The offending url
        url: String,
        /// Parser message
        reason: String,
    },

    /// The scheme is neither a mainnet nor a testnet alias
    #[error("invalid scheme for url: {0}")]
    InvalidScheme(String),

    /// Plain `http` urls always use the default port
    #[error("hydra scheme required when specifying port number: {0}")]
    PortNeedsHydraScheme(String),

    /// The URL has no host part
    #[error("rpc url `{0}` has no host")]
    MissingHost(String),

    /// The URL cannot carry a sub-resource path
    #[error("rpc url `{0}` cannot have a resource path")]
    NotABase(String),

    /// The cookie file exists but could not be read
    #[error("failed to read cookie file {path}: {source}")]
    Cookie {
        /// Location of the cookie file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Short name of a JSON value's kind, used in error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
