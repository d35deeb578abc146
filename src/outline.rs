//! Outline construction from a flat list of leveled headings.
//!
//! The nesting is driven by an explicit stack of frames, one per open
//! level. Level jumps (H1 straight to H4) are bridged by placeholder nodes,
//! one per missing level. Nodes are collected in an index-addressed arena
//! and assembled into the final tree without recursion.

use crate::config::NavStyle;
use crate::model::{AnnotatedHeading, Outline, OutlineNode};

/// Build the outline for a style.
///
/// Hierarchical styles get a forest; the inline style gets the headings at
/// the minimum level present.
pub fn build(headings: &[AnnotatedHeading], style: NavStyle) -> Outline {
    if style.is_hierarchical() {
        Outline::Nested(build_forest(headings))
    } else {
        Outline::Inline(inline_entries(headings))
    }
}

/// Keep only the headings sharing the minimum level, in order.
pub fn inline_entries(headings: &[AnnotatedHeading]) -> Vec<AnnotatedHeading> {
    let Some(min_level) = headings.iter().map(|h| h.level).min() else {
        return Vec::new();
    };
    headings
        .iter()
        .filter(|h| h.level == min_level)
        .cloned()
        .collect()
}

enum Slot {
    Heading(AnnotatedHeading),
    Placeholder(u8),
}

struct ArenaNode {
    slot: Slot,
    children: Vec<usize>,
}

#[derive(Clone, Copy)]
enum Container {
    Root,
    Node(usize),
}

struct Frame {
    level: u8,
    container: Container,
    last: Option<usize>,
}

struct Arena {
    nodes: Vec<ArenaNode>,
    roots: Vec<usize>,
}

impl Arena {
    fn attach(&mut self, container: Container, slot: Slot) -> usize {
        let index = self.nodes.len();
        self.nodes.push(ArenaNode {
            slot,
            children: Vec::new(),
        });
        match container {
            Container::Root => self.roots.push(index),
            Container::Node(parent) => self.nodes[parent].children.push(index),
        }
        index
    }

    /// Assemble the tree bottom-up.
    ///
    /// A child is always created after its parent, so walking the arena
    /// backwards finishes every child before its parent needs it.
    fn into_forest(self) -> Vec<OutlineNode> {
        let mut built: Vec<Option<OutlineNode>> = (0..self.nodes.len()).map(|_| None).collect();

        for (index, node) in self.nodes.into_iter().enumerate().rev() {
            let children: Vec<OutlineNode> = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(match node.slot {
                Slot::Heading(heading) => OutlineNode::Heading { heading, children },
                Slot::Placeholder(level) => OutlineNode::Placeholder { level, children },
            });
        }

        self.roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}

/// Nest headings into a forest.
///
/// A frame is popped only while its level is strictly greater than the
/// incoming heading's level, so consecutive headings of equal level always
/// share one child list.
pub fn build_forest(headings: &[AnnotatedHeading]) -> Vec<OutlineNode> {
    let Some(min_level) = headings.iter().map(|h| h.level).min() else {
        return Vec::new();
    };

    let mut arena = Arena {
        nodes: Vec::with_capacity(headings.len()),
        roots: Vec::new(),
    };
    let mut stack = vec![Frame {
        level: min_level,
        container: Container::Root,
        last: None,
    }];
    let mut placeholders = 0usize;

    for heading in headings {
        let target = heading.level;

        while stack.len() > 1 && stack[stack.len() - 1].level > target {
            stack.pop();
        }

        loop {
            let top = stack.len() - 1;
            if stack[top].level >= target {
                break;
            }
            let parent = match stack[top].last {
                Some(last) => last,
                None => {
                    let level = stack[top].level;
                    let index = arena.attach(stack[top].container, Slot::Placeholder(level));
                    stack[top].last = Some(index);
                    placeholders += 1;
                    index
                }
            };
            let level = stack[top].level + 1;
            stack.push(Frame {
                level,
                container: Container::Node(parent),
                last: None,
            });
        }

        let top = stack.len() - 1;
        let index = arena.attach(stack[top].container, Slot::Heading(heading.clone()));
        stack[top].last = Some(index);
    }

    log::debug!(
        "Built outline: {} headings, {} placeholders, {} roots",
        headings.len(),
        placeholders,
        arena.roots.len()
    );
    arena.into_forest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    fn headings(levels: &[(u8, &str)]) -> Vec<AnnotatedHeading> {
        levels
            .iter()
            .enumerate()
            .map(|(line, (level, text))| {
                AnnotatedHeading::plain(&Heading::new(*level, *text, line))
            })
            .collect()
    }

    fn text(node: &OutlineNode) -> &str {
        node.heading().map_or("<placeholder>", |h| h.text.as_str())
    }

    fn child_texts(node: &OutlineNode) -> Vec<&str> {
        node.children().iter().map(text).collect()
    }

    #[test]
    fn test_level_jump_synthesizes_one_placeholder() {
        let forest = build_forest(&headings(&[(1, "A"), (2, "B"), (4, "C"), (2, "D")]));

        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(text(a), "A");
        assert_eq!(child_texts(a), vec!["B", "D"]);

        let b = &a.children()[0];
        assert_eq!(b.children().len(), 1);
        let placeholder = &b.children()[0];
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.level(), 3);
        assert_eq!(child_texts(placeholder), vec!["C"]);

        let outline = Outline::Nested(forest.clone());
        let synthesized: Vec<_> = outline
            .nodes()
            .into_iter()
            .filter(|n| n.is_placeholder())
            .collect();
        assert_eq!(synthesized.len(), 1);
        assert_eq!(synthesized[0].level(), 3);
    }

    #[test]
    fn test_single_heading_has_no_ancestors() {
        let forest = build_forest(&headings(&[(3, "Only")]));
        assert_eq!(forest.len(), 1);
        assert_eq!(text(&forest[0]), "Only");
        assert!(forest[0].children().is_empty());
    }

    #[test]
    fn test_equal_levels_are_siblings() {
        let forest = build_forest(&headings(&[(1, "A"), (1, "B"), (1, "C")]));
        let roots: Vec<_> = forest.iter().map(text).collect();
        assert_eq!(roots, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_equal_level_after_deeper_does_not_pop() {
        let forest = build_forest(&headings(&[(1, "A"), (2, "B"), (2, "C")]));
        assert_eq!(forest.len(), 1);
        assert_eq!(child_texts(&forest[0]), vec!["B", "C"]);

        let forest = build_forest(&headings(&[(1, "A"), (3, "B"), (3, "C"), (2, "D"), (3, "E")]));
        let a = &forest[0];
        assert_eq!(child_texts(a), vec!["<placeholder>", "D"]);
        assert_eq!(child_texts(&a.children()[0]), vec!["B", "C"]);
        assert_eq!(child_texts(&a.children()[1]), vec!["E"]);
    }

    #[test]
    fn test_jump_from_top_bridges_every_missing_level() {
        let forest = build_forest(&headings(&[(1, "A"), (4, "Deep")]));
        let a = &forest[0];
        let p2 = &a.children()[0];
        let p3 = &p2.children()[0];
        assert_eq!((p2.is_placeholder(), p2.level()), (true, 2));
        assert_eq!((p3.is_placeholder(), p3.level()), (true, 3));
        assert_eq!(child_texts(p3), vec!["Deep"]);
    }

    #[test]
    fn test_leading_deeper_heading_gets_root_placeholder() {
        let forest = build_forest(&headings(&[(2, "X"), (1, "Y"), (2, "Z")]));
        assert_eq!(forest.len(), 2);
        assert!(forest[0].is_placeholder());
        assert_eq!(forest[0].level(), 1);
        assert_eq!(child_texts(&forest[0]), vec!["X"]);
        assert_eq!(text(&forest[1]), "Y");
        assert_eq!(child_texts(&forest[1]), vec!["Z"]);
    }

    #[test]
    fn test_non_monotonic_levels() {
        let forest = build_forest(&headings(&[
            (2, "A"),
            (4, "B"),
            (3, "C"),
            (2, "D"),
            (3, "E"),
        ]));
        let roots: Vec<_> = forest.iter().map(text).collect();
        assert_eq!(roots, vec!["A", "D"]);
        // B sits under a level-3 placeholder; C joins that same frame.
        assert_eq!(child_texts(&forest[0]), vec!["<placeholder>", "C"]);
        assert_eq!(child_texts(&forest[0].children()[0]), vec!["B"]);
        assert_eq!(child_texts(&forest[1]), vec!["E"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_forest(&[]).is_empty());
        assert!(inline_entries(&[]).is_empty());
        assert!(build(&[], NavStyle::Decimal).is_empty());
    }

    #[test]
    fn test_inline_keeps_minimum_level() {
        let outline = build(&headings(&[(1, "A"), (2, "B"), (1, "C")]), NavStyle::Inline);
        match outline {
            Outline::Inline(entries) => {
                let texts: Vec<_> = entries.iter().map(|h| h.text.as_str()).collect();
                assert_eq!(texts, vec!["A", "C"]);
            }
            Outline::Nested(_) => panic!("Expected inline outline"),
        }
    }

    #[test]
    fn test_deep_repeated_document() {
        let levels: Vec<(u8, &str)> = (0..5_000).map(|i| ((i % 6) as u8 + 1, "h")).collect();
        let forest = build_forest(&headings(&levels));
        assert_eq!(forest.len(), 5_000 / 6 + 1);
        let outline = Outline::Nested(forest);
        assert_eq!(outline.headings().len(), 5_000);
        assert!(outline.nodes().iter().all(|n| !n.is_placeholder()));
    }

    #[test]
    fn test_build_is_idempotent() {
        let input = headings(&[(1, "A"), (3, "B"), (2, "C"), (5, "D"), (1, "E")]);
        assert_eq!(build_forest(&input), build_forest(&input));
    }
}
