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

//! Flattening and tabular rendering of nested JSON values
//!
//! [`flatten`] linearizes an object/array tree into [`RenderLine`]s in document
//! order. [`render`] turns those lines into column-aligned text: branch lines
//! carry only their indented label, leaf lines are padded to a common width and
//! followed by the value.
//!
//! Both are lazy and depend only on their inputs. When no column width is
//! supplied, [`render`] has to see every label first, so it materializes the
//! flattened lines once; pass a width to keep output streaming.

use serde_json::{map, Number, Value};
use std::{fmt, iter::Enumerate, slice, vec};

/// Padding added after the longest label when the width is computed
pub const COLUMN_PADDING: usize = 4;

/// Default indentation per nesting level
pub const DEFAULT_INDENT: usize = 2;

/// A JSON leaf value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any JSON number, kept in its original textual form
    Number(&'a Number),
    /// String, displayed without quotes
    String(&'a str),
}

impl<'a> Scalar<'a> {
    /// `None` for objects and arrays
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            Value::Number(number) => Some(Self::Number(number)),
            Value::String(text) => Some(Self::String(text)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(text) => f.write_str(text),
        }
    }
}

/// One flattened line: a branch (`value == None`) or a leaf
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine<'a> {
    /// Path label (last segment, or the full path in full-name mode)
    pub label: String,
    /// Leaf value; `None` for objects and arrays whose children follow
    pub value: Option<Scalar<'a>>,
    /// Nesting depth, starting at the depth passed to [`flatten`]
    pub depth: usize,
}

impl RenderLine<'_> {
    /// Whether this line opens an object or array
    pub fn is_branch(&self) -> bool {
        self.value.is_none()
    }
}

/// Lazily flatten `value` into labelled lines.
///
/// Array children are labelled `<prefix>[<index>]`, object children
/// `<prefix>.<key>`, where `prefix` is the parent's label when `full_names` is
/// set and empty otherwise.
pub fn flatten<'a>(name: &str, value: &'a Value, depth: usize, full_names: bool) -> Flatten<'a> {
    Flatten { stack: vec![Frame::Node { label: name.to_string(), value, depth }], full_names }
}

/// Iterator returned by [`flatten`]
pub struct Flatten<'a> {
    stack: Vec<Frame<'a>>,
    full_names: bool,
}

enum Frame<'a> {
    Node { label: String, value: &'a Value, depth: usize },
    Array { prefix: String, items: Enumerate<slice::Iter<'a, Value>>, depth: usize },
    Object { prefix: String, entries: map::Iter<'a>, depth: usize },
}

impl Flatten<'_> {
    fn child_prefix(&self, label: &str) -> String {
        if self.full_names {
            label.to_string()
        } else {
            String::new()
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = RenderLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Frame::Node { label, value, depth } => {
                    match value {
                        Value::Array(items) => self.stack.push(Frame::Array {
                            prefix: self.child_prefix(&label),
                            items: items.iter().enumerate(),
                            depth,
                        }),
                        Value::Object(map) => self.stack.push(Frame::Object {
                            prefix: self.child_prefix(&label),
                            entries: map.iter(),
                            depth,
                        }),
                        leaf => {
                            return Some(RenderLine {
                                label,
                                value: Scalar::from_value(leaf),
                                depth,
                            })
                        }
                    }
                    return Some(RenderLine { label, value: None, depth });
                }
                Frame::Array { prefix, mut items, depth } => {
                    if let Some((index, item)) = items.next() {
                        let label = format!("{prefix}[{index}]");
                        self.stack.push(Frame::Array { prefix, items, depth });
                        self.stack.push(Frame::Node { label, value: item, depth: depth + 1 });
                    }
                }
                Frame::Object { prefix, mut entries, depth } => {
                    if let Some((key, item)) = entries.next() {
                        let label = format!("{prefix}.{key}");
                        self.stack.push(Frame::Object { prefix, entries, depth });
                        self.stack.push(Frame::Node { label, value: item, depth: depth + 1 });
                    }
                }
            }
        }
    }
}

/// Render `value` as column-aligned text lines.
///
/// `spacer(depth)` produces the indentation of a line. Leaf labels are padded
/// to `column_width`; when `None`, the width is the longest indented label
/// plus [`COLUMN_PADDING`]. A scalar `value` renders as a single line holding
/// just the value.
pub fn render<'a, S>(
    name: &str,
    value: &'a Value,
    spacer: S,
    column_width: Option<usize>,
    full_names: bool,
) -> Render<'a, S>
where
    S: Fn(usize) -> String,
{
    if let Some(scalar) = Scalar::from_value(value) {
        return Render { lines: Lines::Single(Some(scalar.to_string())), spacer, width: 0 };
    }

    let flat = flatten(name, value, 0, full_names);

    match column_width {
        Some(width) => Render { lines: Lines::Streaming(flat), spacer, width },
        None => {
            let buffered: Vec<_> = flat.collect();
            let width = buffered
                .iter()
                .map(|line| spacer(line.depth).chars().count() + line.label.chars().count())
                .max()
                .unwrap_or(0)
                + COLUMN_PADDING;
            Render { lines: Lines::Buffered(buffered.into_iter()), spacer, width }
        }
    }
}

/// Iterator returned by [`render`]
pub struct Render<'a, S> {
    lines: Lines<'a>,
    spacer: S,
    width: usize,
}

enum Lines<'a> {
    Single(Option<String>),
    Streaming(Flatten<'a>),
    Buffered(vec::IntoIter<RenderLine<'a>>),
}

impl<S> Render<'_, S> {
    /// Column at which leaf values start
    pub fn width(&self) -> usize {
        self.width
    }
}

impl<'a, S> Iterator for Render<'a, S>
where
    S: Fn(usize) -> String,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match &mut self.lines {
            Lines::Single(text) => return text.take(),
            Lines::Streaming(flat) => flat.next()?,
            Lines::Buffered(lines) => lines.next()?,
        };

        let label = format!("{}{}", (self.spacer)(line.depth), line.label);
        Some(match line.value {
            // branches stay unpadded
            None => label,
            Some(value) => format!("{label:<width$}{value}", width = self.width),
        })
    }
}

/// Rendering options for callers that indent with plain spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Spaces per nesting level
    pub indent: usize,
    /// Fixed value column; computed from the labels when `None`
    pub column_width: Option<usize>,
    /// Show the full path in every label
    pub full_names: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT, column_width: None, full_names: false }
    }
}

impl RenderStyle {
    /// Full-path labels without indentation, as the CLI's `--full` flag does
    pub fn full() -> Self {
        Self { indent: 0, column_width: None, full_names: true }
    }

    /// Use a fixed value column
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = Some(width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(lines: &[RenderLine<'_>]) -> Vec<(String, Option<String>, usize)> {
        lines
            .iter()
            .map(|line| (line.label.clone(), line.value.map(|v| v.to_string()), line.depth))
            .collect()
    }

    fn spaces(depth: usize) -> String {
        "  ".repeat(depth)
    }

    #[test]
    fn test_flatten_ordering_full_names() {
        let value = json!({"a": 1, "b": [2, 3]});
        let lines: Vec<_> = flatten("", &value, 0, true).collect();

        assert_eq!(
            labels(&lines),
            vec![
                ("".to_string(), None, 0),
                (".a".to_string(), Some("1".to_string()), 1),
                (".b".to_string(), None, 1),
                (".b[0]".to_string(), Some("2".to_string()), 2),
                (".b[1]".to_string(), Some("3".to_string()), 2),
            ]
        );
    }

    #[test]
    fn test_flatten_short_names() {
        let value = json!({"a": 1, "b": [2, {"c": null}]});
        let lines: Vec<_> = flatten("res", &value, 0, false).collect();

        assert_eq!(
            labels(&lines),
            vec![
                ("res".to_string(), None, 0),
                (".a".to_string(), Some("1".to_string()), 1),
                (".b".to_string(), None, 1),
                ("[0]".to_string(), Some("2".to_string()), 2),
                ("[1]".to_string(), None, 2),
                (".c".to_string(), Some("null".to_string()), 3),
            ]
        );
    }

    #[test]
    fn test_flatten_is_restartable() {
        let value = json!({"x": {"y": [true, "z"]}});
        let first: Vec<_> = flatten("n", &value, 2, true).collect();
        let second: Vec<_> = flatten("n", &value, 2, true).collect();

        assert_eq!(first, second);
        assert_eq!(first[0].depth, 2);
        assert_eq!(first.last().map(|l| l.label.as_str()), Some("n.x.y[1]"));
    }

    #[test]
    fn test_flatten_scalar() {
        let value = json!("hello");
        let lines: Vec<_> = flatten("greeting", &value, 0, false).collect();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value, Some(Scalar::String("hello")));
        assert!(!lines[0].is_branch());
    }

    #[test]
    fn test_render_computes_width() {
        let value = json!({"a": 1, "b": [2, 3]});
        let rendered = render("getx", &value, spaces, None, false);
        assert_eq!(rendered.width(), 11);

        let lines: Vec<_> = rendered.collect();
        assert_eq!(
            lines,
            vec!["getx", "  .a       1", "  .b", "    [0]    2", "    [1]    3"]
        );
    }

    #[test]
    fn test_render_with_supplied_width() {
        let value = json!({"balance": 1.5, "txcount": 12});
        let lines: Vec<_> = render("w", &value, |_| String::new(), Some(10), true).collect();

        assert_eq!(lines, vec!["w", "w.balance 1.5", "w.txcount 12"]);
    }

    #[test]
    fn test_render_scalar_short_circuits() {
        let value = json!(1337);
        let lines: Vec<_> = render("getblockcount", &value, spaces, None, false).collect();
        assert_eq!(lines, vec!["1337"]);

        let value = json!("00ab");
        let lines: Vec<_> = render("getbestblockhash", &value, spaces, None, false).collect();
        assert_eq!(lines, vec!["00ab"]);
    }

    #[test]
    fn test_render_empty_containers() {
        let value = json!({});
        let lines: Vec<_> = render("empty", &value, spaces, None, false).collect();
        assert_eq!(lines, vec!["empty"]);

        let value = json!([]);
        let rendered = render("", &value, spaces, None, true);
        assert_eq!(rendered.width(), COLUMN_PADDING);
        assert_eq!(rendered.collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_render_style_defaults() {
        let style = RenderStyle::default();
        assert_eq!(style.indent, DEFAULT_INDENT);
        assert!(!style.full_names);

        let full = RenderStyle::full().with_column_width(30);
        assert_eq!(full.indent, 0);
        assert_eq!(full.column_width, Some(30));
    }
}
