//! Plain text rendering for navigation.

use crate::config::DisplayConfig;
use crate::model::{AnnotatedHeading, NoteReference, Outline, OutlineNode};
use crate::view::NavRender;

use super::{marker::list_marker, EMPTY_MESSAGE};

/// Convert a render outcome to plain text.
pub fn to_text(render: &NavRender) -> String {
    match render {
        NavRender::Outline { config, outline } => TextRenderer::new(config).render(outline),
        NavRender::Empty { .. } => EMPTY_MESSAGE.to_string(),
        NavRender::Error { message } => message.clone(),
    }
}

/// Text renderer.
pub struct TextRenderer<'a> {
    config: &'a DisplayConfig,
}

impl<'a> TextRenderer<'a> {
    /// Create a new text renderer.
    pub fn new(config: &'a DisplayConfig) -> Self {
        Self { config }
    }

    /// Render an outline to text.
    pub fn render(&self, outline: &Outline) -> String {
        if outline.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let mut output = String::new();
        if !self.config.title.is_empty() {
            output.push_str(&self.config.title);
            output.push('\n');
        }

        match outline {
            Outline::Nested(roots) => {
                let mut path = Vec::new();
                self.render_list(&mut output, roots, &mut path);
            }
            Outline::Inline(entries) => {
                let line = entries
                    .iter()
                    .map(|h| self.heading_label(h))
                    .collect::<Vec<_>>()
                    .join(&self.config.delimiter);
                output.push_str(&line);
                output.push('\n');
            }
        }

        output.trim_end().to_string()
    }

    fn render_list(&self, output: &mut String, nodes: &[OutlineNode], path: &mut Vec<u32>) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index as u32 + 1);
            let depth = path.len() - 1;

            match node {
                OutlineNode::Heading { heading, children } => {
                    let marker = list_marker(self.config.style, &self.config.bullet_symbol, path);
                    let label = self.heading_label(heading);
                    push_line(output, depth, &format!("{} {}", marker, label));

                    if self.config.show_quick_links {
                        for link in &heading.quick_links {
                            push_line(output, depth + 1, &self.quick_link_label(link));
                        }
                    }
                    self.render_list(output, children, path);
                }
                // Placeholders take a position in the list but print nothing.
                OutlineNode::Placeholder { children, .. } => {
                    self.render_list(output, children, path);
                }
            }

            path.pop();
        }
    }

    fn heading_label(&self, heading: &AnnotatedHeading) -> String {
        if !self.config.show_cross_refs || heading.cross_refs.is_empty() {
            return heading.text.clone();
        }
        let refs: Vec<&str> = heading.cross_refs.iter().map(NoteReference::label).collect();
        format!("{} [{}]", heading.text, refs.join(", "))
    }

    fn quick_link_label(&self, link: &NoteReference) -> String {
        if self.config.quick_link_prefix.is_empty() {
            link.label().to_string()
        } else {
            format!("{} {}", self.config.quick_link_prefix, link.label())
        }
    }
}

fn push_line(output: &mut String, depth: usize, text: &str) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(text);
    output.push('\n');
}
