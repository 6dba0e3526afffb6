//! Depth-first traversal of the syntax tree.

use std::fmt::Write as _;

use crate::parser::{Body, Close, Node};

/// Callbacks for [`walk`]. Both default to doing nothing.
///
/// `parent` is `None` for top-level nodes; `index` is the position of `node`
/// among its siblings.
pub trait Visitor {
    /// Called before the node's children are visited.
    fn enter(&mut self, node: &Node, parent: Option<&Node>, index: usize) {
        let _ = (node, parent, index);
    }

    /// Called after the node's children are visited.
    fn leave(&mut self, node: &Node, parent: Option<&Node>, index: usize) {
        let _ = (node, parent, index);
    }
}

/// Visit every node in document order.
///
/// Only a [`Body::Present`] body is descended into.
pub fn walk<V: Visitor + ?Sized>(nodes: &[Node], visitor: &mut V) {
    for (index, node) in nodes.iter().enumerate() {
        visit(node, None, index, visitor);
    }
}

fn visit<V: Visitor + ?Sized>(node: &Node, parent: Option<&Node>, index: usize, visitor: &mut V) {
    visitor.enter(node, parent, index);
    if let Node::Tag(tag) = node
        && let Body::Present(children) = &tag.body
    {
        for (i, child) in children.iter().enumerate() {
            visit(child, Some(node), i, visitor);
        }
    }
    visitor.leave(node, parent, index);
}

/// Render the tree as indented text, one node per line with its byte span.
#[must_use]
pub fn dump_tree(nodes: &[Node]) -> String {
    let mut dumper = TreeDumper::default();
    walk(nodes, &mut dumper);
    dumper.out
}

#[derive(Default)]
struct TreeDumper {
    out: String,
    depth: usize,
}

impl Visitor for TreeDumper {
    fn enter(&mut self, node: &Node, _parent: Option<&Node>, _index: usize) {
        let prefix = "  ".repeat(self.depth);
        match node {
            Node::Text(text) => {
                let display = text.value.replace('\n', "\\n").replace(' ', "\u{00B7}");
                let _ = writeln!(
                    self.out,
                    "{prefix}\"{display}\" [{}..{}]",
                    text.start, text.end
                );
            }
            Node::Tag(tag) => {
                let attrs: Vec<String> = tag
                    .attributes
                    .iter()
                    .map(|attr| match &attr.value {
                        Some(value) => format!("{}=\"{}\"", attr.name.value, value.value),
                        None => attr.name.value.clone(),
                    })
                    .collect();
                let head = if attrs.is_empty() {
                    format!("<{}>", tag.raw_name)
                } else {
                    format!("<{} {}>", tag.raw_name, attrs.join(" "))
                };
                let state = match (&tag.body, &tag.close) {
                    (Body::Absent, _) => " (no body)",
                    (Body::Unterminated, _) => " (unterminated)",
                    (Body::Present(_), Close::Unterminated) => " (unclosed)",
                    (Body::Present(_), Close::Present(_) | Close::Absent) => "",
                };
                let _ = writeln!(
                    self.out,
                    "{prefix}{head} [{}..{}]{state}",
                    tag.start, tag.end
                );
            }
        }
        self.depth += 1;
    }

    fn leave(&mut self, _node: &Node, _parent: Option<&Node>, _index: usize) {
        self.depth -= 1;
    }
}
