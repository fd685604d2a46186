//! HTML backend for devlog entries.
//!
//! Produces HTML5 with one block element per line.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::backend::RenderBackend;

/// HTML render backend.
///
/// Produces:
/// - `<article class="post">` containers
/// - `<h2>` titles, `<h3>`/`<h4>` sub-headers
/// - `<time>` dates
/// - `<pre><code>` for fenced blocks
/// - `<video controls>` with a nested `<source>` for video embeds
/// - `<img>` for image embeds
/// - `<p>` for everything else
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn entry_start(identifier: &str, out: &mut String) {
        writeln!(
            out,
            r#"<article class="post" id="post-{}">"#,
            escape_attr(identifier)
        )
        .unwrap();
    }

    fn entry_end(out: &mut String) {
        out.push_str("</article>\n");
    }

    fn title(text: &str, out: &mut String) {
        writeln!(out, "<h2>{text}</h2>").unwrap();
    }

    fn date(date: Option<NaiveDate>, display: &str, out: &mut String) {
        match date {
            Some(date) => writeln!(
                out,
                r#"<time datetime="{}">{display}</time>"#,
                date.format("%Y-%m-%d")
            )
            .unwrap(),
            None => writeln!(out, "<time>{}</time>", escape_html(display)).unwrap(),
        }
    }

    fn sub_header(level: u8, text: &str, out: &mut String) {
        writeln!(out, "<h{level}>{text}</h{level}>").unwrap();
    }

    fn code_block_start(out: &mut String) {
        out.push_str("<pre><code>");
    }

    fn code_line(line: &str, out: &mut String) {
        out.push_str(&escape_html(line));
        out.push('\n');
    }

    fn code_block_end(out: &mut String) {
        out.push_str("</code></pre>\n");
    }

    fn video(url: &str, dimensions: Option<(u32, u32)>, out: &mut String) {
        let style_attr = match dimensions {
            Some((width, height)) => format!(r#" style="aspect-ratio: {width}/{height}""#),
            None => String::new(),
        };
        writeln!(
            out,
            r#"<video controls{style_attr}><source src="{}"></video>"#,
            escape_attr(url)
        )
        .unwrap();
    }

    fn image(url: &str, alt: &str, out: &mut String) {
        writeln!(
            out,
            r#"<img src="{}" alt="{}">"#,
            escape_attr(url),
            escape_attr(alt)
        )
        .unwrap();
    }

    fn paragraph(html: &str, out: &mut String) {
        writeln!(out, "<p>{html}</p>").unwrap();
    }
}

/// Escape `&`, `<` and `>` for HTML text content.
///
/// Each character is replaced at most once, so entities produced here are
/// never escaped again within the same call.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a value for use inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
