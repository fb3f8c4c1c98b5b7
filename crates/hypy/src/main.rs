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

//! hy - Hydra chain RPC toolkit
//!
//! Runs one of the registered apps, either as `hy <app>` or through a
//! multi-call name such as `hy-cli`.

use eyre::Result;
use hypy_rpc::RpcError;
use hypy_utils::logging;
use std::{io, process::ExitCode};

mod app;
mod apps;
mod output;

use app::{AppContext, Cli};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let common = cli.app.common();
    let ctx = AppContext::new(common);

    let _log_guard =
        logging::init_logging("hy", ctx.verbosity.level(), common.log.log_file.clone().into())?;

    let mut stdout = io::stdout();
    let outcome = tokio::select! {
        outcome = cli.app.run(&ctx, &mut stdout) => outcome,
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            return Ok(ExitCode::SUCCESS);
        }
    };

    let Err(err) = outcome else {
        return Ok(ExitCode::SUCCESS);
    };

    if ctx.verbosity.reraise() {
        return Err(err);
    }

    match err.downcast_ref::<RpcError>().and_then(RpcError::as_remote) {
        Some(remote) => {
            let mut stdout = io::stdout();
            ctx.output.emit_json(&mut stdout, &remote.to_json())?;
        }
        None => {
            tracing::debug!(error = ?err, "App failed");
            eprintln!("hy: {err}");
        }
    }

    Ok(ExitCode::FAILURE)
}
