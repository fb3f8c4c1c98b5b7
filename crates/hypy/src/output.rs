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

//! Printing results in the selected output mode

use crate::app::OutputArgs;
use eyre::Result;
use hypy_rpc::{RenderStyle, RpcResult};
use itertools::Itertools;
use serde_json::Value;
use std::io::Write;

/// How an app prints results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON, compact or indented
    Json {
        /// Indent the document
        pretty: bool,
    },
    /// Indented, column-aligned text
    Table {
        /// Full names without indentation
        full: bool,
        /// Write and flush each line as it is rendered
        unbuffered: bool,
    },
}

impl OutputMode {
    /// Mode selected by the output flags; JSON wins over table options
    pub fn from_args(args: &OutputArgs) -> Self {
        if args.json || args.json_pretty {
            Self::Json { pretty: args.json_pretty }
        } else {
            Self::Table { full: args.full, unbuffered: args.unbuffered }
        }
    }

    /// Whether JSON output was requested
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json { .. })
    }

    /// Render options for table output
    pub fn render_style(&self) -> RenderStyle {
        match self {
            Self::Table { full: true, .. } => RenderStyle::full(),
            _ => RenderStyle::default(),
        }
    }

    /// Print a call result under `name`
    pub fn emit(&self, out: &mut dyn Write, result: &RpcResult, name: &str) -> Result<()> {
        match *self {
            Self::Json { .. } => self.emit_json(out, &result.serialize(Some(name))),
            Self::Table { unbuffered: true, .. } => {
                for line in result.render(name, &self.render_style()) {
                    writeln!(out, "{line}")?;
                    out.flush()?;
                }
                Ok(())
            }
            Self::Table { unbuffered: false, .. } => {
                let text = result.render(name, &self.render_style()).join("\n");
                writeln!(out, "{text}")?;
                Ok(())
            }
        }
    }

    /// Print a JSON document, indented when `-J` was given
    pub fn emit_json(&self, out: &mut dyn Write, value: &Value) -> Result<()> {
        let text = match self {
            Self::Json { pretty: true } => serde_json::to_string_pretty(value)?,
            _ => serde_json::to_string(value)?,
        };
        writeln!(out, "{text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output_of(mode: OutputMode, result: &RpcResult, name: &str) -> String {
        let mut out = Vec::new();
        mode.emit(&mut out, result, name).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn table() -> OutputMode {
        OutputMode::Table { full: false, unbuffered: false }
    }

    #[test]
    fn test_mode_from_args() {
        let mut args = OutputArgs { json: false, json_pretty: false, full: true, unbuffered: false };
        assert_eq!(OutputMode::from_args(&args), OutputMode::Table { full: true, unbuffered: false });

        args.json = true;
        assert_eq!(OutputMode::from_args(&args), OutputMode::Json { pretty: false });

        args.json_pretty = true;
        assert!(OutputMode::from_args(&args).is_json());
        assert_eq!(OutputMode::from_args(&args), OutputMode::Json { pretty: true });
    }

    #[test]
    fn test_table_output() {
        let result = RpcResult::from(json!({"result": {"a": 1, "b": [2, 3]}, "error": null}));

        assert_eq!(
            output_of(table(), &result, "getx"),
            "getx\n  .a       1\n  .b\n    [0]    2\n    [1]    3\n"
        );

        let unbuffered = OutputMode::Table { full: false, unbuffered: true };
        assert_eq!(output_of(unbuffered, &result, "getx"), output_of(table(), &result, "getx"));
    }

    #[test]
    fn test_scalar_table_output() {
        let result = RpcResult::from(json!({"result": 1337, "error": null}));
        assert_eq!(output_of(table(), &result, "getblockcount"), "1337\n");
    }

    #[test]
    fn test_json_output() {
        let result = RpcResult::from(json!({"result": 1337, "error": null}));

        assert_eq!(
            output_of(OutputMode::Json { pretty: false }, &result, "getblockcount"),
            "{\"getblockcount\":1337}\n"
        );
        assert_eq!(
            output_of(OutputMode::Json { pretty: true }, &result, "getblockcount"),
            "{\n  \"getblockcount\": 1337\n}\n"
        );
    }
}
