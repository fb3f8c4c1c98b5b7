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

//! Result envelope around decoded JSON-RPC response documents
//!
//! An [`RpcResult`] owns the whole decoded body (`{"result", "error", "id", ...}`
//! or any other JSON document) and exposes:
//! - the resolved payload via [`RpcResult::value`],
//! - field and index access that composes at any depth,
//! - JSON serialization for machine readable output,
//! - tabular rendering through [`crate::render`].

use crate::{
    error::{kind_of, ResultError},
    render::{self, RenderStyle},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Envelope around one decoded RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcResult(Value);

impl RpcResult {
    /// Wrap a decoded response document.
    ///
    /// Nested objects and arrays are reached through [`Self::field`], [`Self::get`]
    /// and [`Self::index`], which hand out envelopes again.
    pub fn from_json(doc: Value) -> Self {
        Self(doc)
    }

    /// The document exactly as received
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Consume the envelope, returning the raw document
    pub fn into_raw(self) -> Value {
        self.0
    }

    /// The payload that matters.
    ///
    /// A non-null `error` wins over `result`; without either key the whole
    /// document is the payload.
    pub fn value(&self) -> &Value {
        resolve(&self.0)
    }

    /// Consume the envelope, returning [`Self::value`]
    pub fn into_value(self) -> Value {
        match self.0 {
            Value::Object(mut map) => {
                if map.get("error").is_some_and(|err| !err.is_null()) {
                    map.remove("error").unwrap_or_default()
                } else {
                    map.remove("result").unwrap_or(Value::Object(map))
                }
            }
            other => other,
        }
    }

    /// Whether the document carries a non-null `error`
    pub fn is_error(&self) -> bool {
        self.0.get("error").is_some_and(|err| !err.is_null())
    }

    /// Required field access.
    ///
    /// Looks in the resolved value first, then in the document itself, so that
    /// protocol fields such as `id` stay reachable even when the value is a
    /// scalar or an array.
    pub fn field(&self, name: &str) -> Result<Self, ResultError> {
        let value = self.value();
        let found = match value {
            Value::Object(map) => map.get(name).or_else(|| self.0.get(name)),
            _ => self.0.get(name),
        };

        match (found, value) {
            (Some(found), _) => Ok(Self(found.clone())),
            (None, Value::Object(_)) => Err(ResultError::FieldNotFound(name.to_string())),
            (None, other) => {
                Err(ResultError::NotAnObject { field: name.to_string(), kind: kind_of(other) })
            }
        }
    }

    /// Permissive field access, `None` when absent or not an object
    pub fn get(&self, name: &str) -> Option<Self> {
        self.field(name).ok()
    }

    /// Element of an array-backed value
    pub fn index(&self, index: usize) -> Option<Self> {
        self.value().get(index).cloned().map(Self)
    }

    /// Number of elements (arrays) or fields (objects) of the resolved value
    pub fn len(&self) -> usize {
        match self.value() {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Whether the resolved value has no elements or fields
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local, pre-render mutation of a field of the resolved value.
    ///
    /// Writes into `result` when the document has one. Nothing is sent back to
    /// the node.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ResultError> {
        let target = match &mut self.0 {
            Value::Object(map) if map.contains_key("result") => &mut map["result"],
            other => other,
        };

        match target {
            Value::Object(map) => {
                map.insert(name.to_string(), value);
                Ok(())
            }
            other => {
                Err(ResultError::NotAnObject { field: name.to_string(), kind: kind_of(other) })
            }
        }
    }

    /// JSON form of the envelope.
    ///
    /// With no `name` the resolved value is returned as-is for embedding.
    /// With a name, objects and arrays are serialized child by child and a
    /// scalar becomes `{name: value}`.
    pub fn serialize(&self, name: Option<&str>) -> Value {
        let value = self.value();

        let Some(name) = name else {
            return value.clone();
        };

        match value {
            Value::Object(_) | Value::Array(_) => serialize_node(value),
            scalar => {
                let mut map = Map::new();
                map.insert(name.to_string(), scalar.clone());
                Value::Object(map)
            }
        }
    }

    /// Render the resolved value as tabular lines
    pub fn render<'a>(
        &'a self,
        name: &'a str,
        style: &RenderStyle,
    ) -> impl Iterator<Item = String> + 'a {
        let indent = style.indent;
        render::render(
            name,
            self.value(),
            move |depth| " ".repeat(indent * depth),
            style.column_width,
            style.full_names,
        )
    }
}

impl From<Value> for RpcResult {
    fn from(doc: Value) -> Self {
        Self::from_json(doc)
    }
}

impl fmt::Display for RpcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// Value resolution on any JSON document
fn resolve(doc: &Value) -> &Value {
    match doc.get("error") {
        Some(err) if !err.is_null() => err,
        _ => doc.get("result").unwrap_or(doc),
    }
}

/// Child-by-child serialization; arrays are only unpacked one level
fn serialize_node(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter().map(|(key, child)| (key.clone(), serialize_node(resolve(child)))).collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Array(_) => item.clone(),
                    other => serialize_node(resolve(other)),
                })
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
