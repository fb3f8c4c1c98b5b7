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

//! JSON-RPC toolkit for Hydra nodes.
//!
//! - [`RpcClient`] posts JSON-RPC 2.0 requests and wraps responses in an [`RpcResult`].
//! - [`RpcResult`] navigates the response envelope and renders it as JSON or as
//!   an indented table (see [`render`]).
//! - [`NodeRpc`] adds typed node methods and name-based dispatch over [`METHODS`].
//! - [`EndpointResolver`] turns `main://`/`test://` shorthands into node URLs.

pub mod client;
pub mod error;
pub mod methods;
pub mod params;
pub mod render;
pub mod result;
pub mod url;

pub use client::{RpcClient, RpcClientBuilder, RpcRequest};
pub use error::{RemoteError, ResultError, RpcError, UrlError};
pub use methods::{lookup, BoolOrInt, Category, MethodSpec, NodeRpc, ParamKind, ParamSpec, METHODS};
pub use params::{coerce_param, coerce_params};
pub use render::{RenderLine, RenderStyle, Scalar};
pub use result::RpcResult;
pub use url::{EndpointResolver, Network, NodeEndpoint};
