//! HTML rendering for navigation.
//!
//! Markup and class names follow the `structured-nav-*` scheme used by the
//! stylesheet: heading links carry `data-line` so a host can jump to the
//! heading, and reference links carry `data-target` so it can open the note.

use crate::config::{DisplayConfig, NavStyle};
use crate::model::{AnnotatedHeading, NoteReference, Outline, OutlineNode};
use crate::view::NavRender;

use super::marker::is_numbered;
use super::EMPTY_MESSAGE;

/// Convert a render outcome to an HTML fragment.
pub fn to_html(render: &NavRender) -> String {
    match render {
        NavRender::Outline { config, outline } => HtmlRenderer::new(config).render(outline),
        NavRender::Empty { .. } => format!(
            "<div class=\"structured-nav\"><p class=\"structured-nav-empty\">{}</p></div>",
            EMPTY_MESSAGE
        ),
        NavRender::Error { message } => format!(
            "<div class=\"structured-nav\"><p class=\"structured-nav-error\">{}</p></div>",
            escape_html(message)
        ),
    }
}

/// HTML renderer.
pub struct HtmlRenderer<'a> {
    config: &'a DisplayConfig,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a new HTML renderer.
    pub fn new(config: &'a DisplayConfig) -> Self {
        Self { config }
    }

    /// Render an outline to an HTML fragment.
    pub fn render(&self, outline: &Outline) -> String {
        let mut output = String::from("<div class=\"structured-nav\">");

        if outline.is_empty() {
            output.push_str(&format!(
                "<p class=\"structured-nav-empty\">{}</p></div>",
                EMPTY_MESSAGE
            ));
            return output;
        }

        if !self.config.title.is_empty() {
            output.push_str(&format!(
                "<div class=\"structured-nav-title\">{}</div>",
                escape_html(&self.config.title)
            ));
        }

        match outline {
            Outline::Nested(roots) => self.render_root_list(&mut output, roots),
            Outline::Inline(entries) => self.render_inline(&mut output, entries),
        }

        output.push_str("</div>");
        output
    }

    fn list_tag(&self) -> &'static str {
        if is_numbered(self.config.style) {
            "ol"
        } else {
            "ul"
        }
    }

    fn render_root_list(&self, output: &mut String, roots: &[OutlineNode]) {
        let tag = self.list_tag();
        let custom_bullet =
            self.config.style == NavStyle::Bullet && !self.config.bullet_symbol.is_empty();

        let mut classes = vec![
            "structured-nav-list".to_string(),
            format!("structured-nav-{}", self.config.style),
        ];
        if custom_bullet {
            classes.push("structured-nav-custom-bullet".to_string());
        }

        output.push_str(&format!("<{} class=\"{}\"", tag, classes.join(" ")));
        if custom_bullet {
            let value = format!("\"{} \"", self.config.bullet_symbol);
            output.push_str(&format!(
                " style=\"--bullet-symbol: {}\"",
                escape_html(&value)
            ));
        }
        output.push('>');
        self.render_items(output, roots);
        output.push_str(&format!("</{}>", tag));
    }

    fn render_items(&self, output: &mut String, nodes: &[OutlineNode]) {
        let tag = self.list_tag();
        for node in nodes {
            output.push_str("<li>");
            if let Some(heading) = node.heading() {
                self.render_heading(output, heading);
            }
            let children = node.children();
            if !children.is_empty() {
                output.push_str(&format!("<{}>", tag));
                self.render_items(output, children);
                output.push_str(&format!("</{}>", tag));
            }
            output.push_str("</li>");
        }
    }

    fn render_heading(&self, output: &mut String, heading: &AnnotatedHeading) {
        push_heading_link(output, heading);

        if self.config.show_cross_refs {
            for reference in &heading.cross_refs {
                output.push(' ');
                push_reference(output, "structured-nav-ref", reference, "");
            }
        }

        if self.config.show_quick_links && !heading.quick_links.is_empty() {
            let prefix = if self.config.quick_link_prefix.is_empty() {
                String::new()
            } else {
                format!("{} ", self.config.quick_link_prefix)
            };
            output.push_str("<ul class=\"structured-nav-quick-links\">");
            for link in &heading.quick_links {
                output.push_str("<li>");
                push_reference(output, "structured-nav-quick-link", link, &prefix);
                output.push_str("</li>");
            }
            output.push_str("</ul>");
        }
    }

    fn render_inline(&self, output: &mut String, entries: &[AnnotatedHeading]) {
        output.push_str("<div class=\"structured-nav-inline\">");
        for (index, heading) in entries.iter().enumerate() {
            if index > 0 {
                output.push_str(&format!(
                    "<span class=\"structured-nav-delimiter\">{}</span>",
                    escape_html(&self.config.delimiter)
                ));
            }
            push_heading_link(output, heading);
            if self.config.show_cross_refs {
                for reference in &heading.cross_refs {
                    output.push(' ');
                    push_reference(output, "structured-nav-ref", reference, "");
                }
            }
        }
        output.push_str("</div>");
    }
}

fn push_heading_link(output: &mut String, heading: &AnnotatedHeading) {
    let text = escape_html(&heading.text);
    output.push_str(&format!(
        "<a class=\"structured-nav-link\" data-line=\"{}\" data-heading=\"{}\">{}</a>",
        heading.line, text, text
    ));
}

fn push_reference(output: &mut String, class: &str, reference: &NoteReference, prefix: &str) {
    output.push_str(&format!(
        "<a class=\"{}\" data-target=\"{}\">{}{}</a>",
        class,
        escape_html(&reference.target),
        escape_html(prefix),
        escape_html(reference.label())
    ));
}

/// Escape text for use in HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    fn heading(level: u8, text: &str, line: usize) -> AnnotatedHeading {
        AnnotatedHeading::plain(&Heading::new(level, text, line))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_bullet_list_markup() {
        let outline = Outline::Nested(vec![OutlineNode::Heading {
            heading: heading(1, "A", 0),
            children: vec![OutlineNode::Placeholder {
                level: 2,
                children: vec![OutlineNode::Heading {
                    heading: heading(3, "C", 4),
                    children: Vec::new(),
                }],
            }],
        }]);
        let config = DisplayConfig::default().with_title("");
        let html = HtmlRenderer::new(&config).render(&outline);

        assert_eq!(
            html,
            "<div class=\"structured-nav\"><ul class=\"structured-nav-list structured-nav-bullet\">\
             <li><a class=\"structured-nav-link\" data-line=\"0\" data-heading=\"A\">A</a>\
             <ul><li><ul><li><a class=\"structured-nav-link\" data-line=\"4\" data-heading=\"C\">C</a>\
             </li></ul></li></ul></li></ul></div>"
        );
    }

    #[test]
    fn test_numbered_styles_use_ordered_lists() {
        let outline = Outline::Nested(vec![OutlineNode::Heading {
            heading: heading(1, "A", 0),
            children: Vec::new(),
        }]);
        let config = DisplayConfig::default().with_style(NavStyle::Outline);
        let html = HtmlRenderer::new(&config).render(&outline);
        assert!(html.contains("<div class=\"structured-nav-title\">Table of Contents</div>"));
        assert!(html.contains("<ol class=\"structured-nav-list structured-nav-outline\">"));
    }

    #[test]
    fn test_custom_bullet() {
        let outline = Outline::Nested(vec![OutlineNode::Heading {
            heading: heading(1, "A", 0),
            children: Vec::new(),
        }]);
        let config = DisplayConfig::default().with_bullet_symbol("★");
        let html = HtmlRenderer::new(&config).render(&outline);
        assert!(html.contains("structured-nav-custom-bullet"));
        assert!(html.contains("style=\"--bullet-symbol: &quot;★ &quot;\""));
    }

    #[test]
    fn test_references_markup() {
        let mut intro = heading(2, "Intro", 5);
        intro.cross_refs = vec![NoteReference::with_display("Glossary", "Terms")];
        intro.quick_links = vec![NoteReference::new("Setup")];
        let outline = Outline::Nested(vec![OutlineNode::Heading {
            heading: intro,
            children: Vec::new(),
        }]);

        let config = DisplayConfig::default();
        let html = HtmlRenderer::new(&config).render(&outline);
        assert!(html.contains("<a class=\"structured-nav-ref\" data-target=\"Glossary\">Terms</a>"));
        assert!(html.contains(
            "<ul class=\"structured-nav-quick-links\"><li>\
             <a class=\"structured-nav-quick-link\" data-target=\"Setup\">→ Setup</a></li></ul>"
        ));

        let hidden = config.with_cross_refs(false).with_quick_links(false);
        let html = HtmlRenderer::new(&hidden).render(&outline);
        assert!(!html.contains("structured-nav-ref"));
        assert!(!html.contains("structured-nav-quick-link"));
    }

    #[test]
    fn test_inline_markup() {
        let outline = Outline::Inline(vec![heading(1, "A", 0), heading(1, "C", 3)]);
        let config = DisplayConfig::default().with_title("");
        let html = HtmlRenderer::new(&config).render(&outline);
        assert_eq!(
            html,
            "<div class=\"structured-nav\"><div class=\"structured-nav-inline\">\
             <a class=\"structured-nav-link\" data-line=\"0\" data-heading=\"A\">A</a>\
             <span class=\"structured-nav-delimiter\"> | </span>\
             <a class=\"structured-nav-link\" data-line=\"3\" data-heading=\"C\">C</a></div></div>"
        );
    }

    #[test]
    fn test_empty_and_error_markup() {
        let empty = to_html(&NavRender::Empty {
            config: DisplayConfig::default(),
        });
        assert!(empty.contains("<p class=\"structured-nav-empty\">No headings found</p>"));
        assert!(!empty.contains("structured-nav-title"));

        let error = to_html(&NavRender::Error {
            message: "Error parsing nav config: <bad>".to_string(),
        });
        assert!(error.contains(
            "<p class=\"structured-nav-error\">Error parsing nav config: &lt;bad&gt;</p>"
        ));
    }
}
