//! Typed view of the BoxNote JSON tree
//!
//! The input is first decoded into a `serde_json::Value` and then validated into [`Node`]s.
//! Validation is where structural errors surface: a node object without `type`, or a mark
//! without `type`, aborts the conversion with the JSON path of the offending value.
//!
//! Shapes tolerated without error:
//! - `content` given as a single object instead of a list
//! - nested lists inside `content` (flattened in order)
//! - scalars and nulls inside `content` (skipped)
//! - `attrs` or `marks` of the wrong shape (treated as absent)

use crate::error::ConvertError;
use log::debug;
use serde_json::{Map, Value};

/// Node and mark attributes, passed verbatim to the tag templates.
pub type Attrs = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub kind: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: String,
    pub attrs: Attrs,
    pub marks: Vec<Mark>,
    pub content: Vec<Node>,
    /// Text of a `text` node; empty otherwise
    pub text: String,
    /// JSON path of this node, used in error messages
    pub path: String,
}

impl Node {
    pub fn mark(&self, kind: &str) -> Option<&Mark> {
        self.marks.iter().rev().find(|mark| mark.kind == kind)
    }
}

/// Validate a `content` value into an ordered list of nodes.
pub fn collect_nodes(value: &Value, path: &str) -> Result<Vec<Node>, ConvertError> {
    let mut nodes = Vec::new();
    collect_into(value, path, &mut nodes)?;
    Ok(nodes)
}

fn collect_into(value: &Value, path: &str, nodes: &mut Vec<Node>) -> Result<(), ConvertError> {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_into(item, &format!("{path}[{i}]"), nodes)?;
            }
        }
        Value::Object(object) => nodes.push(node_from_object(object, path)?),
        _ => {}
    }
    Ok(())
}

fn node_from_object(object: &Map<String, Value>, path: &str) -> Result<Node, ConvertError> {
    let kind = match object.get("type") {
        None => return Err(ConvertError::malformed(path, "no type field")),
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => {
            debug!("{path}: non-string node type {other}");
            String::new()
        }
    };

    let marks = match object.get("marks") {
        Some(Value::Array(marks)) => marks
            .iter()
            .enumerate()
            .map(|(i, mark)| mark_from_value(mark, &format!("{path}.marks[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    let content = match object.get("content") {
        Some(content) => collect_nodes(content, &format!("{path}.content"))?,
        None => Vec::new(),
    };

    Ok(Node {
        kind,
        attrs: attrs_of(object),
        marks,
        content,
        text: object
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        path: path.to_string(),
    })
}

fn mark_from_value(value: &Value, path: &str) -> Result<Mark, ConvertError> {
    let kind = value
        .as_object()
        .and_then(|mark| mark.get("type"))
        .ok_or_else(|| ConvertError::malformed(path, "no type field"))?;
    Ok(Mark {
        kind: kind.as_str().unwrap_or_default().to_string(),
        attrs: value.as_object().map(attrs_of).unwrap_or_default(),
    })
}

fn attrs_of(object: &Map<String, Value>) -> Attrs {
    match object.get("attrs") {
        Some(Value::Object(attrs)) => attrs.clone(),
        _ => Attrs::new(),
    }
}
