use std::fmt::Write;

use crate::render::{RenderOptions, escape_markup, normalize_inline, timecode::format_clock};
use crate::segment::Segment;

const STYLE: &str = "body { font-family: Arial, Helvetica, sans-serif; max-width: 48rem; margin: 2rem auto; line-height: 1.5; }
.segment { margin: 0.4rem 0; }
.timestamp { font-family: monospace; color: #555; margin-right: 0.5rem; }
.speaker { font-weight: bold; margin-right: 0.25rem; }";

/// Standalone HTML document, one `div.segment` per segment
pub fn render_html(segments: &[Segment], options: &RenderOptions) -> String {
    let title = escape_markup(options.title());
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(out, "<html lang=\"{}\">", escape_markup(options.language()));
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", title);
    let _ = writeln!(out, "<style>\n{}\n</style>", STYLE);
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", title);

    for seg in segments {
        out.push_str("<div class=\"segment\">");
        let _ = write!(out, "<span class=\"timestamp\">[{}]</span>", format_clock(seg.start));
        if let Some(speaker) = seg.speaker() {
            let _ = write!(out, "<span class=\"speaker\">{}:</span>", escape_markup(speaker));
        }
        let _ = write!(out, "<span class=\"text\">{}</span>", escape_markup(&normalize_inline(&seg.text)));
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
