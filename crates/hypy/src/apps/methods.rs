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

//! `hy methods`: the method table behind `hy rpc`

use crate::app::{AppContext, CommonArgs, HydraApp};
use clap::Args;
use eyre::Result;
use hypy_rpc::{methods::methods_in, Category, MethodSpec};
use serde_json::{json, Value};
use std::io::Write;

/// List the node methods known to the rpc app
#[derive(Debug, Clone, Args)]
pub struct MethodsApp {
    /// Only list this category (blockchain, control, generating, mining,
    /// network, rawtransactions, util, wallet)
    #[arg(value_name = "CATEGORY", value_parser = parse_category)]
    pub category: Option<Category>,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_name(name).ok_or_else(|| format!("unknown category '{name}'"))
}

fn method_json(spec: &MethodSpec) -> Value {
    let params: Vec<_> = spec
        .params
        .iter()
        .map(|param| json!({"name": param.name, "kind": param.kind.as_str(), "required": param.required}))
        .collect();

    json!({"name": spec.name, "params": params})
}

impl MethodsApp {
    fn categories(&self) -> Vec<Category> {
        match self.category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        }
    }
}

impl HydraApp for MethodsApp {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    async fn run(&self, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
        if ctx.output.is_json() {
            let listing: serde_json::Map<_, _> = self
                .categories()
                .into_iter()
                .map(|category| {
                    let methods: Vec<_> = methods_in(category).map(method_json).collect();
                    (category.to_string(), Value::Array(methods))
                })
                .collect();
            return ctx.output.emit_json(out, &Value::Object(listing));
        }

        for (index, category) in self.categories().into_iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "== {category} ==")?;
            for spec in methods_in(category) {
                writeln!(out, "{}", spec.signature())?;
            }
        }
        Ok(())
    }
}
