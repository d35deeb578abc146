//! Integration tests for the heading-to-outline pipeline.

use structured_nav::{
    extract_annotations, generate, merge, normalize, outline, scan_headings, DisplayConfig,
    Heading, NavBlockConfig, NavStyle, NoteReference, Outline, OutlineNode,
};

fn headings(levels: &[(u8, &str)]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(line, (level, text))| Heading::new(*level, *text, line))
        .collect()
}

fn texts(nodes: &[OutlineNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| match n.heading() {
            Some(h) => h.text.clone(),
            None => format!("<{}>", n.level()),
        })
        .collect()
}

#[test]
fn test_nesting_bridges_level_jump() {
    let input = headings(&[(1, "A"), (2, "B"), (4, "C"), (2, "D")]);
    let outline = generate(&input, None, &DisplayConfig::default());

    let Outline::Nested(roots) = &outline else {
        panic!("Expected nested outline");
    };
    assert_eq!(texts(roots), vec!["A"]);

    let a = &roots[0];
    assert_eq!(texts(a.children()), vec!["B", "D"]);

    let b = &a.children()[0];
    assert_eq!(texts(b.children()), vec!["<3>"]);
    assert_eq!(texts(b.children()[0].children()), vec!["C"]);

    let placeholders: Vec<_> = outline
        .nodes()
        .into_iter()
        .filter(|n| n.is_placeholder())
        .collect();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].level(), 3);
}

#[test]
fn test_inline_keeps_minimum_level() {
    let input = headings(&[(1, "A"), (2, "B"), (1, "C")]);
    let config = DisplayConfig::default().with_style(NavStyle::Inline);
    let outline = generate(&input, None, &config);

    let Outline::Inline(entries) = outline else {
        panic!("Expected inline outline");
    };
    let names: Vec<_> = entries.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn test_inline_minimum_is_taken_after_filtering() {
    let input = headings(&[(1, "A"), (2, "B"), (3, "C"), (2, "D")]);
    let config = DisplayConfig::default()
        .with_style(NavStyle::Inline)
        .with_depth(2, 6);
    let names: Vec<_> = generate(&input, None, &config)
        .headings()
        .iter()
        .map(|h| h.text.clone())
        .collect();
    assert_eq!(names, vec!["B", "D"]);
}

#[test]
fn test_cross_reference_extraction() {
    let text = "## Intro +[[Glossary|Terms]]\n";
    let found = scan_headings(text);
    let annotations = extract_annotations(text, &found);

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].text, "Intro");
    assert_eq!(
        annotations[0].cross_refs,
        vec![NoteReference::with_display("Glossary", "Terms")]
    );
    assert!(annotations[0].quick_links.is_empty());
}

#[test]
fn test_quick_link_scan_stops_at_prose() {
    let text = "line 0\nline 1\nline 2\nline 3\nline 4\n\
                # Heading\n\
                -- [[Setup]]\n\
                \n\
                -- [[Usage]]\n\
                Some prose.\n\
                -- [[Ignored]]\n";
    let found = scan_headings(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].line, 5);

    let annotations = extract_annotations(text, &found);
    let links: Vec<_> = annotations[0]
        .quick_links
        .iter()
        .map(|l| l.target.as_str())
        .collect();
    assert_eq!(links, vec!["Setup", "Usage"]);
}

#[test]
fn test_quick_link_scan_stops_at_next_heading() {
    let text = "# One\n-- [[First]]\n## Two\n-- [[Second]]\n";
    let found = scan_headings(text);
    let annotations = extract_annotations(text, &found);

    assert_eq!(annotations[0].quick_links, vec![NoteReference::new("First")]);
    assert_eq!(annotations[1].quick_links, vec![NoteReference::new("Second")]);
}

#[test]
fn test_override_precedence() {
    let defaults = DisplayConfig::default();
    let block = NavBlockConfig::parse("min_depth: 3").unwrap();
    let resolved = merge(&defaults, &block);

    assert_eq!(resolved.style, NavStyle::Bullet);
    assert_eq!(resolved.min_depth, 3);
    assert_eq!(resolved.max_depth, 6);
    assert_eq!(resolved.title, "Table of Contents");
}

#[test]
fn test_unannotated_text_round_trips() {
    let text = "#   Padded title   \n## Plain\n";
    let found = scan_headings(text);
    let annotations = extract_annotations(text, &found);
    let normalized = normalize(&found, Some(&annotations), 1, 6);

    let names: Vec<_> = normalized.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(names, vec!["Padded title", "Plain"]);
    assert!(normalized.iter().all(|h| !h.has_references()));
}

#[test]
fn test_depth_filter_keeps_order_without_releveling() {
    let input = headings(&[(4, "w"), (1, "x"), (3, "y"), (2, "z"), (6, "q")]);
    let normalized = normalize(&input, None, 2, 4);

    let kept: Vec<_> = normalized.iter().map(|h| (h.level, h.text.as_str())).collect();
    assert_eq!(kept, vec![(4, "w"), (3, "y"), (2, "z")]);
}

#[test]
fn test_leading_deep_heading_gets_placeholder_roots() {
    let input = headings(&[(3, "Deep"), (1, "Top")]);
    let forest = outline::build_forest(&normalize(&input, None, 1, 6));

    assert_eq!(texts(&forest), vec!["<1>", "Top"]);
    assert_eq!(texts(forest[0].children()), vec!["<2>"]);
    assert_eq!(texts(forest[0].children()[0].children()), vec!["Deep"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let text = "# A +[[X]]\n-- [[Y]]\n### B\n## C\n# D\n";
    let found = scan_headings(text);
    let config = DisplayConfig::default().with_style(NavStyle::Outline);

    let first = generate(&found, Some(text), &config);
    let second = generate(&found, Some(text), &config);
    assert_eq!(first, second);
}
