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

//! Application framework shared by every `hy` app
//!
//! Apps are clap [`Args`] structs implementing [`HydraApp`]. The [`APPS`]
//! registry supplies their description and version and decides which names are
//! valid for multi-call binaries (`hy-<app>`).

use crate::{
    apps::{CallApp, CliApp, MethodsApp, RpcApp},
    output::OutputMode,
};
use clap::{ArgAction, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use eyre::Result;
use hypy_rpc::{coerce_param, url::DEFAULT_RPC_URL, EndpointResolver, NodeRpc, RpcError};
use hypy_utils::{LogLevel, Verbosity};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::{
    env,
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

/// Environment variable adding to the `-v` count
pub const VERBOSE_ENV: &str = "HYPY_V";

/// Prefix of multi-call binary names
pub const MULTI_CALL_PREFIX: &str = "hy-";

/// Registry entry of an app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInfo {
    /// Subcommand name
    pub name: &'static str,
    /// One-line description
    pub about: &'static str,
    /// App version, independent of the crate version
    pub version: &'static str,
}

/// Every app `hy` can run
pub static APPS: &[AppInfo] = &[
    AppInfo { name: "cli", about: "Call any node method and render the full response", version: "1.01" },
    AppInfo { name: "rpc", about: "Call a known node method and print its result", version: "1.01" },
    AppInfo { name: "call", about: "Convert a contract function signature to its method id", version: "1.00" },
    AppInfo { name: "methods", about: "List the node methods known to the rpc app", version: "1.00" },
];

/// Look up an app by name
pub fn app_info(name: &str) -> Option<&'static AppInfo> {
    APPS.iter().find(|info| info.name == name)
}

/// An application runnable by `hy`
pub trait HydraApp {
    /// Options shared by all apps
    fn common(&self) -> &CommonArgs;

    /// Run the app, writing its output to `out`
    async fn run(&self, ctx: &AppContext, out: &mut dyn Write) -> Result<()>;
}

/// Hydra chain RPC toolkit
#[derive(Debug, Parser)]
#[command(name = "hy")]
#[command(about = "HyPy - Hydra chain RPC toolkit")]
#[command(version)]
pub struct Cli {
    /// Application to run
    #[command(subcommand)]
    pub app: App,
}

/// Available applications
#[derive(Debug, Subcommand)]
pub enum App {
    /// Call any node method and render the full response
    Cli(CliApp),
    /// Call a known node method and print its result
    Rpc(RpcApp),
    /// Convert a contract function signature to its method id
    Call(CallApp),
    /// List the node methods known to the rpc app
    Methods(MethodsApp),
}

impl App {
    /// Options shared by all apps
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Cli(app) => app.common(),
            Self::Rpc(app) => app.common(),
            Self::Call(app) => app.common(),
            Self::Methods(app) => app.common(),
        }
    }

    /// Run the selected app
    pub async fn run(&self, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Cli(app) => app.run(ctx, out).await,
            Self::Rpc(app) => app.run(ctx, out).await,
            Self::Call(app) => app.run(ctx, out).await,
            Self::Methods(app) => app.run(ctx, out).await,
        }
    }
}

impl Cli {
    /// clap command with descriptions and versions taken from [`APPS`]
    pub fn registered_command() -> clap::Command {
        APPS.iter().fold(Self::command(), |command, info| {
            command.mut_subcommand(info.name, |sub| sub.about(info.about).version(info.version))
        })
    }

    /// Parse process-style arguments, handling multi-call names
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = multi_call_args(args.into_iter().map(Into::into).collect());
        let matches = Self::registered_command().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Parse the process arguments, exiting with clap's message on failure
    pub fn parse_args() -> Self {
        Self::try_parse_args(env::args_os()).unwrap_or_else(|err| err.exit())
    }
}

/// Rewrite `hy-<app> ARGS` as `hy <app> ARGS`.
///
/// `hy-<app> <app> ARGS` is accepted too. Unknown suffixes are left alone so
/// clap reports them.
pub fn multi_call_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let Some(argv0) = args.first() else {
        return args;
    };

    let stem = Path::new(argv0).file_stem().map(|stem| stem.to_string_lossy().into_owned());
    let Some(info) = stem.as_deref().and_then(|stem| stem.strip_prefix(MULTI_CALL_PREFIX)).and_then(app_info)
    else {
        return args;
    };

    args[0] = OsString::from("hy");
    if args.get(1).is_none_or(|first| first.as_os_str() != info.name) {
        args.insert(1, OsString::from(info.name));
    }
    args
}

/// Options shared by all apps
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Node connection options
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Node")]
pub struct RpcArgs {
    /// Node url: main://[USER:PASS@]HOST[:PORT], test://HOST[:PORT] or http://HOST
    #[arg(long = "rpc", env = "HY_RPC", value_name = "URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Wallet to send wallet calls to
    #[arg(long = "rpc-wallet", env = "HY_RPC_WALLET", value_name = "WALLET", value_parser = parse_wallet)]
    pub wallet: Option<String>,

    /// Connect to testnet regardless of the url scheme
    #[arg(long = "rpc-testnet", env = "HY_RPC_TESTNET")]
    pub testnet: bool,
}

/// Wallet names go through the same coercion as parameters, so quoting works
fn parse_wallet(raw: &str) -> Result<String, RpcError> {
    Ok(match coerce_param(raw)? {
        Value::String(name) => name,
        other => other.to_string(),
    })
}

/// Output formatting options
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Output")]
pub struct OutputArgs {
    /// Output compact JSON
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Output indented JSON
    #[arg(short = 'J', long = "json-pretty")]
    pub json_pretty: bool,

    /// Output full names without indentation (non-JSON only)
    #[arg(short = 'f', long = "full")]
    pub full: bool,

    /// Print each line as soon as it is rendered (non-JSON only)
    #[arg(short = 'u', long = "unbuffered")]
    pub unbuffered: bool,
}

/// Logging options
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Logging")]
pub struct LogArgs {
    /// Verbose level, up to 3x (env: HYPY_V adds to the count)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Log level: error, warning, info, debug, trace or notset
    #[arg(short = 'l', long = "log", env = "HYPY_LOG", value_name = "LEVEL", default_value = "notset")]
    pub log: LogLevel,

    /// Also write logs to this file
    #[arg(long = "log-file", env = "HYPY_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    /// Effective verbosity from flags and environment
    pub fn verbosity(&self) -> Verbosity {
        let from_env = env::var(VERBOSE_ENV).ok().and_then(|v| v.trim().parse::<u8>().ok()).unwrap_or(0);
        Verbosity::resolve(from_env.saturating_add(self.verbose), self.log)
    }
}

/// Per-invocation state handed to apps
#[derive(Debug)]
pub struct AppContext {
    rpc: RpcArgs,
    node: OnceCell<NodeRpc>,
    /// How results are printed
    pub output: OutputMode,
    /// Effective verbosity
    pub verbosity: Verbosity,
}

impl AppContext {
    /// Context for an app's shared options; the node is not contacted yet
    pub fn new(common: &CommonArgs) -> Self {
        Self {
            rpc: common.rpc.clone(),
            node: OnceCell::new(),
            output: OutputMode::from_args(&common.output),
            verbosity: common.log.verbosity(),
        }
    }

    /// Node client, resolved from `--rpc` on first use
    pub fn node(&self) -> Result<&NodeRpc> {
        self.node.get_or_try_init(|| {
            let endpoint =
                EndpointResolver::new().testnet(self.rpc.testnet).resolve(&self.rpc.url)?;
            tracing::info!(url = %self.rpc.url, network = ?endpoint.network, "Connecting to node");
            Ok(NodeRpc::from_endpoint(endpoint, self.rpc.wallet.as_deref())?)
        })
    }
}
