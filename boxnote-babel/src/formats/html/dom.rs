//! DOM preparation for the tag-stream parser
//!
//! The parser consumes a flat tag stream, but tables need a tree: their grid is computed from
//! rows and cells, and each cell's markup is re-parsed on its own. Both views come from the same
//! html5ever parse. The tree is serialized back to markup and that serialization is what gets
//! tokenized, so every `<table>` start tag in the stream lines up with a table found in the tree.

use crate::error::ConvertError;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Markup normalized through the DOM, plus the tree it came from.
pub struct PreparedMarkup {
    pub markup: String,
    pub document: Handle,
}

pub fn prepare(markup: &str) -> Result<PreparedMarkup, ConvertError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);
    let document = dom.document.clone();
    let markup = serialize_node(&document, TraversalScope::ChildrenOnly(None))?;
    Ok(PreparedMarkup { markup, document })
}

/// Serialize a node with the given scope.
pub fn serialize_node(node: &Handle, scope: TraversalScope) -> Result<String, ConvertError> {
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    let mut output = Vec::new();
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| ConvertError::Markup(format!("HTML serialization failed: {e}")))?;
    String::from_utf8(output)
        .map_err(|e| ConvertError::Markup(format!("UTF-8 conversion failed: {e}")))
}

/// Inner markup of an element: each child serialized in turn.
pub fn inner_markup(element: &Handle) -> Result<String, ConvertError> {
    element
        .children
        .borrow()
        .iter()
        .map(|child| serialize_node(child, TraversalScope::IncludeNode))
        .collect()
}

pub fn is_element(node: &Handle, local: &str) -> bool {
    matches!(&node.data, NodeData::Element { name, .. } if &*name.local == local)
}

/// Element children matching any of `names`, in order.
pub fn child_elements(node: &Handle, names: &[&str]) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| names.iter().any(|name| is_element(child, name)))
        .cloned()
        .collect()
}

/// Number of descendant elements named `local`.
pub fn count_descendants(node: &Handle, local: &str) -> usize {
    let mut count = 0;
    let mut stack: Vec<Handle> = node.children.borrow().clone();
    while let Some(child) = stack.pop() {
        count += usize::from(is_element(&child, local));
        stack.extend(child.children.borrow().iter().cloned());
    }
    count
}
