//! Heading normalization and depth filtering.

use crate::annotate::HeadingAnnotations;
use crate::model::{AnnotatedHeading, Heading};

/// Keep the headings whose level lies in `[min_depth, max_depth]`.
///
/// Relative order is preserved. An inverted range yields nothing.
pub fn filter_headings(headings: &[Heading], min_depth: u8, max_depth: u8) -> Vec<Heading> {
    headings
        .iter()
        .filter(|h| h.level >= min_depth && h.level <= max_depth)
        .cloned()
        .collect()
}

/// Merge headings with their annotations and apply the depth filter.
///
/// `annotations` must line up with `headings` when present; `None` means
/// extraction was skipped, so every heading gets empty reference lists.
/// Levels are kept as they are, even when an ancestor level was filtered out.
pub fn normalize(
    headings: &[Heading],
    annotations: Option<&[HeadingAnnotations]>,
    min_depth: u8,
    max_depth: u8,
) -> Vec<AnnotatedHeading> {
    let normalized: Vec<AnnotatedHeading> = headings
        .iter()
        .enumerate()
        .filter(|(_, h)| h.level >= min_depth && h.level <= max_depth)
        .map(|(index, heading)| match annotations.and_then(|a| a.get(index)) {
            Some(found) => AnnotatedHeading {
                level: heading.level,
                text: found.text.clone(),
                line: heading.line,
                cross_refs: found.cross_refs.clone(),
                quick_links: found.quick_links.clone(),
            },
            None => AnnotatedHeading::plain(heading),
        })
        .collect();

    log::debug!(
        "Kept {} of {} headings in depth range {}..={}",
        normalized.len(),
        headings.len(),
        min_depth,
        max_depth
    );
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteReference;

    fn sample() -> Vec<Heading> {
        vec![
            Heading::new(1, "One", 0),
            Heading::new(3, "Three", 2),
            Heading::new(2, "Two", 4),
            Heading::new(6, "Six", 6),
            Heading::new(4, "Four", 8),
        ]
    }

    #[test]
    fn test_filter_keeps_range_in_order() {
        let filtered = filter_headings(&sample(), 2, 4);
        let texts: Vec<_> = filtered.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Three", "Two", "Four"]);
    }

    #[test]
    fn test_filter_inverted_range_is_empty() {
        assert!(filter_headings(&sample(), 5, 2).is_empty());
        assert!(normalize(&sample(), None, 5, 2).is_empty());
    }

    #[test]
    fn test_normalize_without_annotations() {
        let headings = vec![Heading::new(2, " Padded ", 3)];
        let result = normalize(&headings, None, 1, 6);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Padded");
        assert_eq!(result[0].level, 2);
        assert_eq!(result[0].line, 3);
        assert!(!result[0].has_references());
    }

    #[test]
    fn test_normalize_keeps_levels() {
        let result = normalize(&sample(), None, 4, 6);
        let levels: Vec<_> = result.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![6, 4]);
    }

    #[test]
    fn test_normalize_pairs_annotations_by_index() {
        let headings = vec![Heading::new(1, "Skip", 0), Heading::new(2, "Keep +[[Ref]]", 1)];
        let annotations = vec![
            HeadingAnnotations {
                text: "Skip".to_string(),
                ..Default::default()
            },
            HeadingAnnotations {
                text: "Keep".to_string(),
                cross_refs: vec![NoteReference::new("Ref")],
                quick_links: Vec::new(),
            },
        ];

        let result = normalize(&headings, Some(&annotations), 2, 6);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Keep");
        assert_eq!(result[0].cross_refs, vec![NoteReference::new("Ref")]);
    }
}
