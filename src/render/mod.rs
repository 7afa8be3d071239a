//! Turning segments into something a surface can show.

pub mod html;
pub mod terminal;

use crate::content::Segment;

/// A surface that can typeset one display-math block.
pub trait MathSurface {
    type Output;

    /// `latex` is the trimmed markup between the `$$` markers.
    fn typeset(&self, latex: &str) -> Self::Output;
}

/// Something that knows how to show plain text blocks alongside math blocks.
pub trait SegmentSink: MathSurface {
    fn text(&self, content: &str) -> Self::Output;
}

/// Render segments in order through `sink`, one output per segment.
pub fn render_segments<S: SegmentSink>(sink: &S, segments: &[Segment<'_>]) -> Vec<S::Output> {
    segments
        .iter()
        .map(|segment| {
            if segment.is_math() {
                sink.typeset(segment.content)
            } else {
                sink.text(segment.content)
            }
        })
        .collect()
}
