use super::{render_segments, MathSurface, SegmentSink};
use crate::content::Segment;

const MATHJAX_SRC: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";
const POLYFILL_SRC: &str = "https://polyfill.io/v3/polyfill.min.js?features=es6";

/// Emits HTML blocks for a MathJax page.
#[derive(Debug, Clone, Copy)]
pub struct HtmlMath {
    pub dark: bool,
}

impl MathSurface for HtmlMath {
    type Output = String;

    fn typeset(&self, latex: &str) -> String {
        format!("<div class=\"math\">\\[{}\\]</div>", escape(latex))
    }
}

impl SegmentSink for HtmlMath {
    fn text(&self, content: &str) -> String {
        format!("<p class=\"text\">{}</p>", escape(content))
    }
}

impl HtmlMath {
    /// A page holding every segment of a reply in order.
    pub fn page(&self, segments: &[Segment<'_>]) -> String {
        self.document(&render_segments(self, segments).join("\n"))
    }

    fn document(&self, body: &str) -> String {
        let color = if self.dark { "#fff" } else { "#000" };
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    html, body {{
      margin: 0;
      padding: 0;
      background-color: transparent;
    }}
    .text {{
      color: {color};
      font-family: monospace;
      font-size: 16px;
      padding: 0 8px;
      white-space: pre-wrap;
    }}
    .math {{
      font-size: 22px;
      color: {color};
      display: flex;
      justify-content: center;
      padding: 8px;
    }}
  </style>
  <script src="{POLYFILL_SRC}"></script>
  <script src="{MATHJAX_SRC}"></script>
</head>
<body>
{body}
</body>
</html>
"#
        )
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
