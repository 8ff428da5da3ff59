//! Match layers
//!
//! A [`Layer`] is the set of styled spans one rule set produced for a line.
//! Raw layers may overlap; [`Layer::normalize`] turns them into a sorted,
//! overlap-free sequence. [`stack`] merges two normalized layers so that
//! the top one wins wherever they collide, splitting bottom spans around it.

use super::style::ResolvedStyle;
use crate::error::{HighlightError, Result};

/// A styled half-open byte range `[start, end)` within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Escape sequences to wrap the span in
    pub style: ResolvedStyle,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: ResolvedStyle) -> Self {
        Self { start, end, style }
    }

    /// Same style over a different range
    fn with_range(&self, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            style: self.style.clone(),
        }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// An ordered sequence of spans for one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layer {
    spans: Vec<Span>,
}

impl Layer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span
    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Number of spans
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the layer has no spans
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Iterate over spans in order
    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    /// Borrow the spans
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Sort ascending by start; on equal starts the longer span comes first
    pub fn sort(&mut self) -> &mut Self {
        self.spans
            .sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        self
    }

    /// Drop spans that collide with a later one.
    ///
    /// Later spans have higher priority: the list is scanned from the end and
    /// a span is kept only if it intersects nothing kept so far. The result
    /// is in reverse scan order; call [`Layer::sort`] afterwards.
    pub fn remove_overlaps(&mut self) -> &mut Self {
        let mut kept: Vec<Span> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..).rev() {
            if !kept.iter().any(|existing| existing.overlaps(&span)) {
                kept.push(span);
            }
        }
        self.spans = kept;
        self
    }

    /// Remove overlaps and sort
    pub fn normalize(&mut self) -> &mut Self {
        self.remove_overlaps().sort()
    }

    /// Check that the layer is normalized and every span is non-empty and
    /// falls on char boundaries of `line`
    pub fn check_bounds(&self, line: &str) -> Result<()> {
        let mut prev_end = 0;
        for span in &self.spans {
            let in_bounds = span.start >= prev_end
                && span.start < span.end
                && span.end <= line.len()
                && line.is_char_boundary(span.start)
                && line.is_char_boundary(span.end);
            if !in_bounds {
                return Err(HighlightError::InvalidSpan {
                    start: span.start,
                    end: span.end,
                    len: line.len(),
                });
            }
            prev_end = span.end;
        }
        Ok(())
    }
}

impl From<Vec<Span>> for Layer {
    fn from(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

impl Extend<Span> for Layer {
    fn extend<I: IntoIterator<Item = Span>>(&mut self, iter: I) {
        self.spans.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

/// Merge two normalized layers, `top` winning where they overlap.
///
/// Bottom spans that are partly covered are truncated, and a bottom span
/// that fully contains a top span is split into a left and right
/// remainder. Both inputs must be sorted and overlap-free; so is the result.
pub fn stack(top: &Layer, bottom: &Layer) -> Layer {
    let mut out = Vec::with_capacity(top.len() + bottom.len());
    let mut tops = top.iter();
    let mut bottoms = bottom.iter();
    let mut cur_top = tops.next().cloned();
    // Current bottom span, possibly a remainder of one
    let mut cur_bot = bottoms.next().cloned();

    loop {
        let (t, b) = match (&cur_top, &cur_bot) {
            (Some(t), Some(b)) => (t.clone(), b.clone()),
            _ => break,
        };

        // no overlap: top before bottom
        if t.end <= b.start {
            out.push(t);
            cur_top = tops.next().cloned();
            continue;
        }
        // no overlap: bottom before top
        if b.end <= t.start {
            out.push(b);
            cur_bot = bottoms.next().cloned();
            continue;
        }

        // top covers bottom entirely
        if t.start <= b.start && t.end >= b.end {
            cur_bot = bottoms.next().cloned();
            continue;
        }

        // bottom covers top entirely: left remainder, top, then right remainder
        if b.start <= t.start && b.end >= t.end {
            if b.start < t.start {
                out.push(b.with_range(b.start, t.start));
            }
            cur_bot = if b.end > t.end {
                Some(b.with_range(t.end, b.end))
            } else {
                bottoms.next().cloned()
            };
            out.push(t);
            cur_top = tops.next().cloned();
            continue;
        }

        if b.start < t.start {
            // bottom runs into top: keep its head
            out.push(b.with_range(b.start, t.start));
            cur_bot = bottoms.next().cloned();
        } else {
            // bottom runs out of top: keep its tail for the next top
            cur_bot = Some(b.with_range(t.end, b.end));
            out.push(t);
            cur_top = tops.next().cloned();
        }
    }

    out.extend(cur_top);
    out.extend(tops.cloned());
    out.extend(cur_bot);
    out.extend(bottoms.cloned());

    Layer::from(out)
}

/// Fold layers given in ascending priority into one.
///
/// The first layer is the initial bottom; each following layer is stacked
/// on top of the running result.
pub fn stack_all<I>(layers: I) -> Layer
where
    I: IntoIterator<Item = Layer>,
{
    layers
        .into_iter()
        .fold(Layer::new(), |bottom, top| stack(&top, &bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn top_style() -> ResolvedStyle {
        ResolvedStyle::new("T", "t")
    }

    fn bottom_style() -> ResolvedStyle {
        ResolvedStyle::new("B", "b")
    }

    fn layer(ranges: &[(usize, usize)], style: ResolvedStyle) -> Layer {
        ranges
            .iter()
            .map(|&(start, end)| Span::new(start, end, style.clone()))
            .collect::<Vec<_>>()
            .into()
    }

    fn ranges(layer: &Layer) -> Vec<(usize, usize, String)> {
        layer
            .iter()
            .map(|s| (s.start, s.end, s.style.start().to_string()))
            .collect()
    }

    fn expect(items: &[(usize, usize, &str)]) -> Vec<(usize, usize, String)> {
        items
            .iter()
            .map(|&(start, end, code)| (start, end, code.to_string()))
            .collect()
    }

    #[test]
    fn test_span_contains_and_overlaps() {
        let span = Span::new(5, 10, top_style());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);

        assert!(span.overlaps(&Span::new(9, 12, top_style())));
        assert!(!span.overlaps(&Span::new(10, 12, top_style())));
        assert!(!span.overlaps(&Span::new(0, 5, top_style())));
    }

    #[test]
    fn test_stack_overlap_right() {
        let top = layer(&[(10, 20)], top_style());
        let bottom = layer(&[(15, 25)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(ranges(&result), expect(&[(10, 20, "T"), (20, 25, "B")]));
        assert_eq!(result.spans()[1].style.end(), "b");
    }

    #[test]
    fn test_stack_overlap_left() {
        let top = layer(&[(20, 30)], top_style());
        let bottom = layer(&[(15, 25)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(ranges(&result), expect(&[(15, 20, "B"), (20, 30, "T")]));
    }

    #[test]
    fn test_stack_enclosed_top() {
        let top = layer(&[(20, 25)], top_style());
        let bottom = layer(&[(15, 30)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(
            ranges(&result),
            expect(&[(15, 20, "B"), (20, 25, "T"), (25, 30, "B")])
        );
    }

    #[test]
    fn test_stack_disjoint() {
        let top = layer(&[(10, 20)], top_style());
        let bottom = layer(&[(30, 40)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(ranges(&result), expect(&[(10, 20, "T"), (30, 40, "B")]));
    }

    #[test]
    fn test_stack_top_covers_bottom() {
        let top = layer(&[(0, 50)], top_style());
        let bottom = layer(&[(5, 10), (20, 30)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(ranges(&result), expect(&[(0, 50, "T")]));
    }

    #[test]
    fn test_stack_remainder_spans_several_tops() {
        // One long bottom span with three top spans inside it
        let top = layer(&[(2, 4), (6, 8), (10, 12)], top_style());
        let bottom = layer(&[(0, 14)], bottom_style());
        let result = stack(&top, &bottom);
        assert_eq!(
            ranges(&result),
            expect(&[
                (0, 2, "B"),
                (2, 4, "T"),
                (4, 6, "B"),
                (6, 8, "T"),
                (8, 10, "B"),
                (10, 12, "T"),
                (12, 14, "B"),
            ])
        );
    }

    #[test]
    fn test_stack_same_bounds_and_shared_edges() {
        let top = layer(&[(5, 10)], top_style());
        let bottom = layer(&[(5, 10)], bottom_style());
        assert_eq!(ranges(&stack(&top, &bottom)), expect(&[(5, 10, "T")]));

        // bottom shares the start, extends past top
        let bottom = layer(&[(5, 15)], bottom_style());
        assert_eq!(
            ranges(&stack(&top, &bottom)),
            expect(&[(5, 10, "T"), (10, 15, "B")])
        );

        // bottom shares the end, starts before top
        let bottom = layer(&[(0, 10)], bottom_style());
        assert_eq!(
            ranges(&stack(&top, &bottom)),
            expect(&[(0, 5, "B"), (5, 10, "T")])
        );
    }

    #[test]
    fn test_stack_identity() {
        let spans = layer(&[(0, 3), (3, 7), (9, 12)], top_style());
        assert_eq!(stack(&spans, &Layer::new()), spans);
        assert_eq!(stack(&Layer::new(), &spans), spans);
    }

    #[test]
    fn test_stack_does_not_modify_inputs() {
        let top = layer(&[(20, 25)], top_style());
        let bottom = layer(&[(15, 30)], bottom_style());
        let _ = stack(&top, &bottom);
        assert_eq!(ranges(&bottom), expect(&[(15, 30, "B")]));
    }

    #[test]
    fn test_stack_all_ascending_priority() {
        let low = layer(&[(0, 10)], ResolvedStyle::new("L", "l"));
        let mid = layer(&[(2, 6)], ResolvedStyle::new("M", "m"));
        let high = layer(&[(4, 8)], ResolvedStyle::new("H", "h"));
        let result = stack_all([low, mid, high]);
        assert_eq!(
            ranges(&result),
            expect(&[(0, 2, "L"), (2, 4, "M"), (4, 8, "H"), (8, 10, "L")])
        );
        assert!(stack_all(Vec::new()).is_empty());
    }

    #[test]
    fn test_remove_overlaps_later_wins() {
        let mut raw = Layer::from(vec![
            Span::new(0, 10, ResolvedStyle::new("A", "")),
            Span::new(5, 15, ResolvedStyle::new("B", "")),
            Span::new(20, 25, ResolvedStyle::new("C", "")),
            Span::new(12, 22, ResolvedStyle::new("D", "")),
        ]);
        raw.normalize();
        // D beats B and C; A does not touch D
        assert_eq!(ranges(&raw), expect(&[(0, 10, "A"), (12, 22, "D")]));
    }

    #[test]
    fn test_sort_ties_longer_first() {
        let mut spans = Layer::from(vec![
            Span::new(4, 6, top_style()),
            Span::new(0, 2, top_style()),
            Span::new(4, 9, top_style()),
        ]);
        spans.sort();
        let bounds: Vec<_> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(bounds, vec![(0, 2), (4, 9), (4, 6)]);
    }

    #[test]
    fn test_check_bounds() {
        let line = "héllo";
        assert!(layer(&[(0, 1), (3, 6)], top_style()).check_bounds(line).is_ok());
        // inside the two-byte 'é'
        assert!(matches!(
            layer(&[(0, 2)], top_style()).check_bounds(line),
            Err(HighlightError::InvalidSpan { start: 0, end: 2, len: 6 })
        ));
        assert!(layer(&[(3, 3)], top_style()).check_bounds(line).is_err());
        assert!(layer(&[(3, 7)], top_style()).check_bounds(line).is_err());
        // overlapping and out of order
        assert!(layer(&[(0, 4), (3, 6)], top_style()).check_bounds(line).is_err());
        assert!(layer(&[(3, 6), (0, 1)], top_style()).check_bounds(line).is_err());
    }

    fn arb_raw_layer() -> impl Strategy<Value = Layer> {
        prop::collection::vec((0usize..60, 1usize..15), 0..24).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (start, len))| {
                    Span::new(start, start + len, ResolvedStyle::new(&i.to_string(), ""))
                })
                .collect::<Vec<_>>()
                .into()
        })
    }

    fn assert_normalized(layer: &Layer) -> std::result::Result<(), TestCaseError> {
        for pair in layer.spans().windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
            prop_assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        for span in layer {
            prop_assert!(span.start < span.end);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_normalize_is_sorted_and_disjoint(mut raw in arb_raw_layer()) {
            raw.normalize();
            assert_normalized(&raw)?;
        }

        #[test]
        fn prop_normalize_keeps_last_span(raw in arb_raw_layer()) {
            let last = raw.spans().last().cloned();
            let mut normalized = raw.clone();
            normalized.normalize();
            if let Some(last) = last {
                prop_assert!(normalized.iter().any(|s| *s == last));
            }
        }

        #[test]
        fn prop_stack_keeps_top_and_stays_disjoint(
            mut top in arb_raw_layer(),
            mut bottom in arb_raw_layer(),
        ) {
            top.normalize();
            bottom.normalize();
            let merged = stack(&top, &bottom);
            assert_normalized(&merged)?;

            // every top span survives untouched
            for span in &top {
                prop_assert!(merged.iter().any(|s| s == span));
            }
            // every byte covered by either input is covered by the result
            for pos in 0..80 {
                let covered = top.iter().chain(bottom.iter()).any(|s| s.contains(pos));
                prop_assert_eq!(covered, merged.iter().any(|s| s.contains(pos)));
            }
        }
    }
}
