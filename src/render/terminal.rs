use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::borrow::Cow;

use super::{render_segments, MathSurface, SegmentSink};
use crate::chat::{ChatRecord, Sender};

pub const TYPING_TEXT: &str = "Gemini is typing...";

const TEXT_INDENT: &str = "  ";
const MATH_INDENT: &str = "    ";

/// Renders segments as styled terminal lines.
///
/// With a `width`, every line is wrapped to fit, so one `Line` is one screen row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalMath {
    pub width: Option<usize>,
}

impl TerminalMath {
    pub fn wrapping(width: usize) -> Self {
        Self { width: Some(width) }
    }

    fn fit(&self, row: &str, indent: &str) -> Vec<String> {
        match self.width {
            Some(width) => textwrap::wrap(row, width.saturating_sub(indent.len()).max(1))
                .into_iter()
                .map(Cow::into_owned)
                .collect(),
            None => vec![row.to_string()],
        }
    }
}

impl MathSurface for TerminalMath {
    type Output = Vec<Line<'static>>;

    fn typeset(&self, latex: &str) -> Self::Output {
        let style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC);
        let rows: Vec<&str> = latex.lines().collect();
        let last = rows.len().saturating_sub(1);

        rows.iter()
            .enumerate()
            .flat_map(|(i, row)| {
                let open = if i == 0 { "⟦ " } else { "  " };
                let close = if i == last { " ⟧" } else { "" };
                self.fit(&format!("{open}{row}{close}"), MATH_INDENT)
            })
            .map(|row| Line::from(vec![Span::raw(MATH_INDENT), Span::styled(row, style)]))
            .collect()
    }
}

impl SegmentSink for TerminalMath {
    fn text(&self, content: &str) -> Self::Output {
        content
            .lines()
            .flat_map(|line| self.fit(line, TEXT_INDENT))
            .map(|line| Line::from(format!("{TEXT_INDENT}{line}")))
            .collect()
    }
}

fn sender_color(sender: Sender) -> Color {
    match sender {
        Sender::User => Color::Cyan,
        Sender::Bot => Color::Green,
        Sender::Error => Color::Red,
    }
}

/// All lines for one record: a header, then one block per segment.
/// `width` is the number of columns available, if lines should wrap.
pub fn record_lines(record: &ChatRecord, width: Option<usize>) -> Vec<Line<'static>> {
    let color = sender_color(record.sender);
    let header = Line::from(vec![
        Span::raw(format!("{} ", record.sender.avatar())),
        Span::styled(
            record.sender.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut lines = vec![header];

    if record.is_pending() {
        lines.push(Line::from(Span::styled(
            format!("  {TYPING_TEXT}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        let segments = record.segments();
        for block in render_segments(&TerminalMath { width }, &segments) {
            lines.extend(block);
        }
    }

    lines.push(Line::from(""));
    lines
}

/// Lines for the whole transcript, in store order.
pub fn transcript_lines(records: &[ChatRecord], width: Option<usize>) -> Vec<Line<'static>> {
    records
        .iter()
        .flat_map(|record| record_lines(record, width))
        .collect()
}

/// Drop styling, for printing to a plain stdout.
pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain_text_strips_styles() {
        let lines = record_lines(&ChatRecord::bot("x $$y$$"), None);
        assert_eq!(plain_text(&lines), "🤖 Gemini\n  x\n    ⟦ y ⟧\n");
    }

    #[test]
    fn test_record_lines_follow_segments() {
        let record = ChatRecord::bot("The answer is $$4$$.");
        let rendered: Vec<String> = record_lines(&record, None).iter().map(line_text).collect();
        assert_eq!(
            rendered,
            vec!["🤖 Gemini", "  The answer is", "    ⟦ 4 ⟧", "  .", ""]
        );
    }

    #[test]
    fn test_multiline_math_is_bracketed_once() {
        let lines = TerminalMath::default().typeset("a + b\n= c");
        let rendered: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(rendered, vec!["    ⟦ a + b", "      = c ⟧"]);
    }

    #[test]
    fn test_pending_record_shows_typing() {
        let rendered: Vec<String> = record_lines(&ChatRecord::pending(), None)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(rendered[1], format!("  {TYPING_TEXT}"));
    }

    #[test]
    fn test_error_record_styling() {
        let lines = record_lines(&ChatRecord::error("Unknown error."), None);
        assert_eq!(line_text(&lines[0]), "⚠️ Error");
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_transcript_lines_concatenate_records() {
        let records = vec![ChatRecord::user("hi"), ChatRecord::bot("hello")];
        let rendered: Vec<String> = transcript_lines(&records, None).iter().map(line_text).collect();
        assert_eq!(
            rendered,
            vec!["🧑 You", "  hi", "", "🤖 Gemini", "  hello", ""]
        );
    }

    #[test]
    fn test_wrapped_lines_fit_width() {
        let record = ChatRecord::bot("one two three four five six $$a + b + c + d + e$$");
        let rendered: Vec<String> = record_lines(&record, Some(12))
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "🤖 Gemini",
                "  one two",
                "  three four",
                "  five six",
                "    ⟦ a + b",
                "    + c + d",
                "    + e ⟧",
                "",
            ]
        );
    }

    #[test]
    fn test_long_word_is_broken_to_width() {
        let lines = TerminalMath::wrapping(8).text("abcdefghijkl");
        let rendered: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(rendered, vec!["  abcdef", "  ghijkl"]);
    }
}
