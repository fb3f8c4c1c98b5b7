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

//! `hy call`: contract method ids

use crate::app::{AppContext, CommonArgs, HydraApp};
use alloy_primitives::{hex, keccak256};
use clap::Args;
use eyre::Result;
use std::io::Write;

/// Convert a contract function signature to its method id
#[derive(Debug, Clone, Args)]
pub struct CallApp {
    /// Function signature, e.g. `transfer(address,uint256)`
    #[arg(value_name = "SIG")]
    pub func_sig: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// First four bytes of the keccak-256 hash of `func_sig`, hex encoded
pub fn method_id(func_sig: &str) -> String {
    hex::encode(&keccak256(func_sig.as_bytes())[..4])
}

impl HydraApp for CallApp {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    async fn run(&self, _ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", method_id(&self.func_sig))?;
        Ok(())
    }
}
