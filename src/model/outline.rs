//! Navigation tree types.

use super::AnnotatedHeading;
use serde::{Deserialize, Serialize};

/// A node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineNode {
    /// An entry for a real heading
    Heading {
        heading: AnnotatedHeading,
        children: Vec<OutlineNode>,
    },

    /// A headingless container bridging a level gap
    Placeholder {
        level: u8,
        children: Vec<OutlineNode>,
    },
}

impl OutlineNode {
    /// Child nodes of this node.
    pub fn children(&self) -> &[OutlineNode] {
        match self {
            OutlineNode::Heading { children, .. } | OutlineNode::Placeholder { children, .. } => {
                children
            }
        }
    }

    /// The heading of this node, if it has one.
    pub fn heading(&self) -> Option<&AnnotatedHeading> {
        match self {
            OutlineNode::Heading { heading, .. } => Some(heading),
            OutlineNode::Placeholder { .. } => None,
        }
    }

    /// Level this node sits at.
    pub fn level(&self) -> u8 {
        match self {
            OutlineNode::Heading { heading, .. } => heading.level,
            OutlineNode::Placeholder { level, .. } => *level,
        }
    }

    /// Check if this node is a synthesized placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, OutlineNode::Placeholder { .. })
    }
}

/// The navigation structure derived from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum Outline {
    /// A forest of nested nodes (bullet, number, decimal, outline styles)
    Nested(Vec<OutlineNode>),

    /// A flat run of top-level headings (inline style)
    Inline(Vec<AnnotatedHeading>),
}

impl Outline {
    /// Check if the outline has no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Outline::Nested(roots) => roots.is_empty(),
            Outline::Inline(entries) => entries.is_empty(),
        }
    }

    /// Walk every node of a nested outline in document order.
    ///
    /// Inline outlines yield nothing.
    pub fn nodes(&self) -> Vec<&OutlineNode> {
        let mut out = Vec::new();
        if let Outline::Nested(roots) = self {
            let mut pending: Vec<&OutlineNode> = roots.iter().rev().collect();
            while let Some(node) = pending.pop() {
                out.push(node);
                pending.extend(node.children().iter().rev());
            }
        }
        out
    }

    /// All headings in document order, whatever the layout.
    pub fn headings(&self) -> Vec<&AnnotatedHeading> {
        match self {
            Outline::Nested(_) => self.nodes().into_iter().filter_map(|n| n.heading()).collect(),
            Outline::Inline(entries) => entries.iter().collect(),
        }
    }
}
