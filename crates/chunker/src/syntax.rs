//! Read-only concrete syntax trees handed to the chunker by a parser provider.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`], so
//! building, walking and dropping a tree never recurses regardless of how deep
//! the parser nested it.

use crate::span::Span;

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    span: Span,
    children: Vec<NodeId>,
}

/// Concrete syntax tree: byte ranges plus ordered child lists
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Root node id
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Byte range of a node
    #[must_use]
    pub fn span(&self, node: NodeId) -> Span {
        self.nodes[node.0].span
    }

    /// Direct children of a node, in source order
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Total number of nodes, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Convert a tree-sitter tree by walking it with a cursor.
    #[must_use]
    pub fn from_tree_sitter(tree: &tree_sitter::Tree) -> Self {
        let root = tree.root_node();
        let mut builder = TreeBuilder::new(root.start_byte(), root.end_byte());

        let mut cursor = tree.walk();
        if !cursor.goto_first_child() {
            return builder.build();
        }

        // Ids of the ancestors of the cursor's node; the top is its parent.
        let mut parents = vec![builder.root()];
        loop {
            let node = cursor.node();
            let Some(&parent) = parents.last() else {
                break;
            };
            let id = builder.push(parent, node.start_byte(), node.end_byte());

            if cursor.goto_first_child() {
                parents.push(id);
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return builder.build();
                }
                parents.pop();
                if parents.is_empty() {
                    return builder.build();
                }
            }
        }

        builder.build()
    }
}

/// Incremental construction of a [`SyntaxTree`]. Children must be pushed in
/// source order.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Start a tree whose root covers `[start, end)`
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            nodes: vec![NodeData {
                span: Span::new(start, end),
                children: Vec::new(),
            }],
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child covering `[start, end)` as the last child of `parent`
    pub fn push(&mut self, parent: NodeId, start: usize, end: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            span: Span::new(start, end),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn build(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}
