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

//! Coercion of free-form command line strings into JSON parameters

use crate::error::RpcError;
use serde_json::Value;

/// Convert a raw CLI token into a JSON value.
///
/// - Surrounding whitespace is trimmed; an empty token stays an empty string.
/// - `'...'` or `"..."` yields the inner text as a string, verbatim, so
///   numeric-looking text can be forced to a string.
/// - Otherwise the token is parsed as JSON (numbers, booleans, `null`, arrays,
///   objects, quoted strings).
/// - Bare words that are not JSON are taken as strings.
/// - Tokens that start like an array or object but do not parse are rejected,
///   as are tokens that cannot be embedded in a JSON string.
///
/// Pure and idempotent, so it is safe to use as a clap value parser.
pub fn coerce_param(raw: &str) -> Result<Value, RpcError> {
    let param = raw.trim();

    if param.is_empty() {
        return Ok(Value::String(String::new()));
    }

    if let Some(inner) = unquote(param) {
        return Ok(Value::String(inner.to_string()));
    }

    let err = match serde_json::from_str::<Value>(param) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    if param.starts_with(['{', '[']) {
        return Err(RpcError::parameter(param, err));
    }

    serde_json::from_str::<Value>(&format!("\"{param}\"")).map_err(|_| RpcError::parameter(param, err))
}

/// Coerce every token, stopping at the first failure
pub fn coerce_params<I, S>(raw: I) -> Result<Vec<Value>, RpcError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|param| coerce_param(param.as_ref())).collect()
}

fn unquote(param: &str) -> Option<&str> {
    // a lone quote both opens and closes
    ['\'', '"']
        .into_iter()
        .find(|&quote| param.starts_with(quote) && param.ends_with(quote))
        .map(|_| param.get(1..param.len().saturating_sub(1)).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_examples() {
        assert_eq!(coerce_param("'123'").unwrap(), json!("123"));
        assert_eq!(coerce_param("\"123\"").unwrap(), json!("123"));
        assert_eq!(coerce_param("123").unwrap(), json!(123));
        assert_eq!(coerce_param("true").unwrap(), json!(true));
        assert_eq!(coerce_param("hello").unwrap(), json!("hello"));
        assert_eq!(coerce_param("[1,2]").unwrap(), json!([1, 2]));
        assert_eq!(coerce_param(r#"{"a": [1, "b"]}"#).unwrap(), json!({"a": [1, "b"]}));
        assert_eq!(coerce_param("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_coerce_trims_and_keeps_quoted_text_verbatim() {
        assert_eq!(coerce_param("  42 ").unwrap(), json!(42));
        assert_eq!(coerce_param("' padded '").unwrap(), json!(" padded "));
        assert_eq!(coerce_param("'[1,2]'").unwrap(), json!("[1,2]"));
        assert_eq!(coerce_param("").unwrap(), json!(""));
        assert_eq!(coerce_param("   ").unwrap(), json!(""));
    }

    #[test]
    fn test_coerce_bare_words() {
        assert_eq!(coerce_param("hello world").unwrap(), json!("hello world"));
        assert_eq!(coerce_param("HSJxV5rvdGBhLb7cFsxYMGP5atHqmqJQmm").unwrap(), json!("HSJxV5rvdGBhLb7cFsxYMGP5atHqmqJQmm"));
        assert_eq!(coerce_param("-").unwrap(), json!("-"));
    }

    #[test]
    fn test_coerce_lone_quote_is_empty() {
        assert_eq!(coerce_param("'").unwrap(), json!(""));
        assert_eq!(coerce_param("\"").unwrap(), json!(""));
        assert_eq!(coerce_param("''").unwrap(), json!(""));
        assert_eq!(coerce_param("'x").unwrap(), json!("'x"));
    }

    #[test]
    fn test_coerce_rejects_malformed() {
        let err = coerce_param("{bad json").unwrap_err();
        assert!(matches!(err, RpcError::Parameter { ref token, .. } if token == "{bad json"));

        assert!(coerce_param("[1,").is_err());
        assert!(coerce_param(r#"say "hi"#).is_err());
    }

    #[test]
    fn test_coerce_is_idempotent() {
        for raw in ["'123'", "123", "true", "hello", "[1,2]", "1.50", "x y", "", "null"] {
            assert_eq!(coerce_param(raw).unwrap(), coerce_param(raw).unwrap());
        }

        // stringified scalars coerce back to themselves
        for value in [json!(123), json!(true), json!(-0.5), json!("hello"), Value::Null] {
            let text = match &value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            assert_eq!(coerce_param(&text).unwrap(), value);
        }
    }

    #[test]
    fn test_coerce_params_stops_at_first_error() {
        assert_eq!(coerce_params(["1", "a"]).unwrap(), vec![json!(1), json!("a")]);
        assert!(coerce_params(["1", "{", "a"]).is_err());
    }
}
