/// Marker that opens and closes a display-math span.
pub const MATH_DELIMITER: &str = "$$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Math,
}

/// A trimmed, non-empty slice of message text tagged as prose or math markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub content: &'a str,
}

impl<'a> Segment<'a> {
    pub fn text(content: &'a str) -> Self {
        Self {
            kind: SegmentKind::Text,
            content,
        }
    }

    pub fn math(content: &'a str) -> Self {
        Self {
            kind: SegmentKind::Math,
            content,
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind == SegmentKind::Math
    }
}

/// Split message text into ordered text and math segments.
///
/// Every `$$...$$` pair becomes a math segment, everything around it text.
/// An opening `$$` with no closing partner is kept as literal text together
/// with the rest of the input. Segments that are blank after trimming are
/// dropped.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(open_rel) = text[cursor..].find(MATH_DELIMITER) {
        let open = cursor + open_rel;
        let body_start = open + MATH_DELIMITER.len();
        let Some(close_rel) = text[body_start..].find(MATH_DELIMITER) else {
            break;
        };
        let close = body_start + close_rel;

        push_trimmed(&mut segments, Segment::text, &text[cursor..open]);
        push_trimmed(&mut segments, Segment::math, &text[body_start..close]);
        cursor = close + MATH_DELIMITER.len();
    }

    push_trimmed(&mut segments, Segment::text, &text[cursor..]);
    segments
}

fn push_trimmed<'a>(
    segments: &mut Vec<Segment<'a>>,
    make: fn(&'a str) -> Segment<'a>,
    raw: &'a str,
) {
    let content = raw.trim();
    if !content.is_empty() {
        segments.push(make(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(segments: &[Segment<'_>]) -> Vec<SegmentKind> {
        segments.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_segment_blank_input() {
        assert!(segment("").is_empty());
        assert!(segment("   ").is_empty());
        assert!(segment("\n\t ").is_empty());
    }

    #[test]
    fn test_segment_plain_text() {
        assert_eq!(segment("plain text"), vec![Segment::text("plain text")]);
        assert_eq!(segment("  padded  "), vec![Segment::text("padded")]);
    }

    #[test]
    fn test_segment_math_only() {
        assert_eq!(segment("$$x^2$$"), vec![Segment::math("x^2")]);
        assert_eq!(segment("$$ \\frac{a}{b} $$"), vec![Segment::math("\\frac{a}{b}")]);
    }

    #[test]
    fn test_segment_text_math_text() {
        assert_eq!(
            segment("before $$x+1$$ after"),
            vec![
                Segment::text("before"),
                Segment::math("x+1"),
                Segment::text("after"),
            ]
        );
    }

    #[test]
    fn test_segment_preserves_order() {
        let segments = segment("$$a$$ one $$b$$$$c$$ two");
        assert_eq!(
            kinds(&segments),
            vec![
                SegmentKind::Math,
                SegmentKind::Text,
                SegmentKind::Math,
                SegmentKind::Math,
                SegmentKind::Text,
            ]
        );
        let contents: Vec<&str> = segments.iter().map(|s| s.content).collect();
        assert_eq!(contents, vec!["a", "one", "b", "c", "two"]);
    }

    #[test]
    fn test_segment_single_dollar_does_not_split() {
        assert_eq!(segment("costs $5 or $6"), vec![Segment::text("costs $5 or $6")]);
        assert_eq!(
            segment("$$f(x) = $x$$$"),
            vec![Segment::math("f(x) = $x"), Segment::text("$")]
        );
    }

    #[test]
    fn test_segment_unterminated_marker_is_literal() {
        assert_eq!(segment("price $$ 10"), vec![Segment::text("price $$ 10")]);
        assert_eq!(
            segment("a $$x$$ b $$ c"),
            vec![Segment::text("a"), Segment::math("x"), Segment::text("b $$ c")]
        );
        assert_eq!(segment("$$"), vec![Segment::text("$$")]);
    }

    #[test]
    fn test_segment_drops_empty_math() {
        assert!(segment("$$$$").is_empty());
        assert_eq!(segment("x $$  $$ y"), vec![Segment::text("x"), Segment::text("y")]);
    }

    #[test]
    fn test_segment_multiline_math() {
        let text = "Solve:\n$$\na + b\n= c\n$$\ndone";
        assert_eq!(
            segment(text),
            vec![
                Segment::text("Solve:"),
                Segment::math("a + b\n= c"),
                Segment::text("done"),
            ]
        );
    }

    #[test]
    fn test_segment_text_rerun_is_stable() {
        for input in ["a $$x$$ b $$ c", "one $$y$$ two", "$$", "x $$ y $$ z $$ w"] {
            let joined: String = segment(input)
                .iter()
                .filter(|s| !s.is_math())
                .map(|s| s.content)
                .collect::<Vec<_>>()
                .join(" ");
            let rerun = segment(&joined);
            assert!(rerun.iter().all(|s| !s.is_math()), "input: {input}");
            let again: String = rerun.iter().map(|s| s.content).collect::<Vec<_>>().join(" ");
            assert_eq!(segment(&again), rerun);
        }
    }
}
