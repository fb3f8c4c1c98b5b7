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

//! `hy rpc`: checked node calls through the method table

use crate::app::{AppContext, CommonArgs, HydraApp};
use clap::Args;
use eyre::Result;
use hypy_rpc::coerce_param;
use serde_json::Value;
use std::io::Write;

/// Call a known node method and print its result
#[derive(Debug, Clone, Args)]
pub struct RpcApp {
    /// RPC method to call (see `hy methods`)
    #[arg(value_name = "CALL")]
    pub call: String,

    /// Method parameters: JSON values, or bare words taken as strings
    #[arg(value_name = "PARAM", value_parser = coerce_param, allow_negative_numbers = true)]
    pub params: Vec<Value>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl HydraApp for RpcApp {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    async fn run(&self, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
        tracing::info!(call = %self.call, params = ?self.params, "rpc");

        let result = ctx.node()?.dispatch(&self.call, self.params.clone()).await?;

        if ctx.output.is_json() {
            ctx.output.emit_json(out, result.value())
        } else {
            writeln!(out, "{result}")?;
            Ok(())
        }
    }
}
