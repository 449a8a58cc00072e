//! Document Tree Nodes
//!
//! Minimal types representing a parsed Hypermark document.
//! No validation logic - pure data representation handed over by the parser.

use serde::{Deserialize, Serialize};

use crate::schema::Kind;

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Structural content with a head and ordered children
    Block(BlockElement),
    /// Content nested through positional arguments
    Inline(InlineElement),
}

/// A block element like `#section`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockElement {
    /// Tag name without the leading '#'
    pub tag: String,
    /// Inline content written on the block's own line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<InlineElement>,
    /// Nested elements, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// An inline element like `#link[text][url]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineElement {
    /// Tag name without the leading '#'
    pub tag: String,
    /// Argument slots, each holding a sequence of inline content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Vec<InlineElement>>,
}

impl Node {
    pub fn tag(&self) -> &str {
        match self {
            Node::Block(block) => &block.tag,
            Node::Inline(inline) => &inline.tag,
        }
    }

    /// Structural kind, as produced by the parser
    pub fn kind(&self) -> Kind {
        match self {
            Node::Block(_) => Kind::Block,
            Node::Inline(_) => Kind::Inline,
        }
    }

    /// Total number of nodes in this subtree, including head and argument content
    pub fn size(&self) -> usize {
        match self {
            Node::Block(block) => block.size(),
            Node::Inline(inline) => inline.size(),
        }
    }
}

impl BlockElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            head: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_head(mut self, head: Vec<InlineElement>) -> Self {
        self.head = head;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Add a single child node
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn size(&self) -> usize {
        1 + self.head.iter().map(InlineElement::size).sum::<usize>()
            + self.children.iter().map(Node::size).sum::<usize>()
    }
}

impl InlineElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument slot
    pub fn arg(mut self, content: Vec<InlineElement>) -> Self {
        self.args.push(content);
        self
    }

    pub fn size(&self) -> usize {
        1 + self
            .args
            .iter()
            .flatten()
            .map(InlineElement::size)
            .sum::<usize>()
    }
}

impl From<BlockElement> for Node {
    fn from(block: BlockElement) -> Self {
        Node::Block(block)
    }
}

impl From<InlineElement> for Node {
    fn from(inline: InlineElement) -> Self {
        Node::Inline(inline)
    }
}
