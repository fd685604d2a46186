//! Line classification.
//!
//! Every source line falls into exactly one [`Line`] category. Outside a
//! fence the category is decided by [`RULES`], evaluated top to bottom; the
//! first rule that matches wins and anything left over is plain text.

use std::sync::LazyLock;

use regex::Regex;

/// `[video](url)`, `[video WxH](url)`, and the compact `[videoWxH](url)`.
static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[video(?:\s*([1-9][0-9]*)x([1-9][0-9]*))?\]\(([^)]*)\)$").unwrap()
});

/// `![alt](url)` occupying the whole line.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]*)\)$").unwrap());

/// Classified source line. Borrowed slices point into the raw line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty line outside a fence.
    Blank,
    /// Triple-backtick line, with an optional (ignored) language tag.
    FenceDelimiter { info: &'a str },
    /// Any line inside a fence other than a delimiter.
    FenceContent(&'a str),
    /// `## ` (level 3) or `### ` (level 4) heading.
    SubHeader { level: u8, text: &'a str },
    /// Video embed with optional width and height.
    Video {
        url: &'a str,
        dimensions: Option<(u32, u32)>,
    },
    /// Image embed; `alt` may be empty.
    Image { url: &'a str, alt: &'a str },
    /// Anything else.
    PlainText(&'a str),
}

type Rule = for<'a> fn(&'a str) -> Option<Line<'a>>;

/// Classification rules outside a fence, in priority order.
const RULES: &[(&str, Rule)] = &[
    ("fence-delimiter", fence_delimiter),
    ("blank", blank),
    ("sub-header-4", sub_header_level4),
    ("sub-header-3", sub_header_level3),
    ("video-embed", video_embed),
    ("image-embed", image_embed),
];

/// Classify one raw source line.
///
/// Inside a fence only a delimiter is recognized; every other line is
/// [`Line::FenceContent`], blank lines included.
///
/// # Examples
///
/// ```
/// use devlog_renderer::{Line, classify};
///
/// assert_eq!(classify("## Notes", false), Line::SubHeader { level: 3, text: "Notes" });
/// assert_eq!(classify("## Notes", true), Line::FenceContent("## Notes"));
/// ```
pub fn classify(line: &str, inside_fence: bool) -> Line<'_> {
    if inside_fence {
        return fence_delimiter(line).unwrap_or(Line::FenceContent(line));
    }
    RULES
        .iter()
        .find_map(|(_, rule)| rule(line))
        .unwrap_or(Line::PlainText(line))
}

fn fence_delimiter(line: &str) -> Option<Line<'_>> {
    let info = line.strip_prefix("```")?.trim();
    if info.contains(|c: char| c == '`' || c.is_whitespace()) {
        return None;
    }
    Some(Line::FenceDelimiter { info })
}

fn blank(line: &str) -> Option<Line<'_>> {
    line.is_empty().then_some(Line::Blank)
}

fn sub_header_level4(line: &str) -> Option<Line<'_>> {
    line.strip_prefix("### ")
        .map(|text| Line::SubHeader { level: 4, text })
}

fn sub_header_level3(line: &str) -> Option<Line<'_>> {
    line.strip_prefix("## ")
        .map(|text| Line::SubHeader { level: 3, text })
}

fn video_embed(line: &str) -> Option<Line<'_>> {
    let caps = VIDEO_RE.captures(line)?;
    let dimensions = match (caps.get(1), caps.get(2)) {
        (Some(width), Some(height)) => {
            // Out-of-range dimensions are not an embed.
            Some((width.as_str().parse().ok()?, height.as_str().parse().ok()?))
        }
        _ => None,
    };
    let url = caps.get(3).map_or("", |m| m.as_str());
    Some(Line::Video { url, dimensions })
}

fn image_embed(line: &str) -> Option<Line<'_>> {
    let caps = IMAGE_RE.captures(line)?;
    let alt = caps.get(1).map_or("", |m| m.as_str());
    let url = caps.get(2).map_or("", |m| m.as_str());
    Some(Line::Image { url, alt })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_priority_order() {
        let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "fence-delimiter",
                "blank",
                "sub-header-4",
                "sub-header-3",
                "video-embed",
                "image-embed",
            ]
        );
    }

    #[test]
    fn test_blank_only_when_truly_empty() {
        assert_eq!(classify("", false), Line::Blank);
        assert_eq!(classify("   ", false), Line::PlainText("   "));
    }

    #[test]
    fn test_fence_delimiter() {
        assert_eq!(classify("```", false), Line::FenceDelimiter { info: "" });
        assert_eq!(
            classify("```rust", false),
            Line::FenceDelimiter { info: "rust" }
        );
        assert_eq!(classify("```", true), Line::FenceDelimiter { info: "" });
    }

    #[test]
    fn test_not_a_fence_delimiter() {
        assert_eq!(classify("````", false), Line::PlainText("````"));
        assert_eq!(
            classify("```rust fn main", false),
            Line::PlainText("```rust fn main")
        );
        assert_eq!(classify(" ```", false), Line::PlainText(" ```"));
    }

    #[test]
    fn test_fence_content_keeps_shape() {
        assert_eq!(classify("", true), Line::FenceContent(""));
        assert_eq!(classify("### x", true), Line::FenceContent("### x"));
        assert_eq!(
            classify("[video](a.mp4)", true),
            Line::FenceContent("[video](a.mp4)")
        );
    }

    #[test]
    fn test_sub_headers() {
        assert_eq!(
            classify("### Deep", false),
            Line::SubHeader {
                level: 4,
                text: "Deep"
            }
        );
        assert_eq!(
            classify("## Section", false),
            Line::SubHeader {
                level: 3,
                text: "Section"
            }
        );
        assert_eq!(classify("#### Four", false), Line::PlainText("#### Four"));
        assert_eq!(classify("##tight", false), Line::PlainText("##tight"));
        assert_eq!(classify("# Late title", false), Line::PlainText("# Late title"));
    }

    #[test]
    fn test_video_without_dimensions() {
        assert_eq!(
            classify("[video](http://x/y.mp4)", false),
            Line::Video {
                url: "http://x/y.mp4",
                dimensions: None
            }
        );
    }

    #[test]
    fn test_video_with_dimensions() {
        assert_eq!(
            classify("[video 1280x720](http://x/y.mp4)", false),
            Line::Video {
                url: "http://x/y.mp4",
                dimensions: Some((1280, 720))
            }
        );
    }

    #[test]
    fn test_video_compact_alias() {
        assert_eq!(
            classify("[video640x480](clip.mp4)", false),
            Line::Video {
                url: "clip.mp4",
                dimensions: Some((640, 480))
            }
        );
    }

    #[test]
    fn test_video_rejects_zero_or_huge_dimensions() {
        assert_eq!(
            classify("[video 0x720](a.mp4)", false),
            Line::PlainText("[video 0x720](a.mp4)")
        );
        let huge = "[video 99999999999x1](a.mp4)";
        assert_eq!(classify(huge, false), Line::PlainText(huge));
    }

    #[test]
    fn test_video_with_empty_url() {
        assert_eq!(
            classify("[video]()", false),
            Line::Video {
                url: "",
                dimensions: None
            }
        );
    }

    #[test]
    fn test_embed_with_trailing_text_is_plain() {
        let line = "[video](a.mp4) and more";
        assert_eq!(classify(line, false), Line::PlainText(line));
        let line = "![shot](a.png).";
        assert_eq!(classify(line, false), Line::PlainText(line));
        let line = "see ![shot](a.png)";
        assert_eq!(classify(line, false), Line::PlainText(line));
    }

    #[test]
    fn test_image() {
        assert_eq!(
            classify("![Boss fight](img/boss.png)", false),
            Line::Image {
                url: "img/boss.png",
                alt: "Boss fight"
            }
        );
        assert_eq!(
            classify("![](img/boss.png)", false),
            Line::Image {
                url: "img/boss.png",
                alt: ""
            }
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            classify("Just words [link](x)", false),
            Line::PlainText("Just words [link](x)")
        );
        assert_eq!(classify("- list item", false), Line::PlainText("- list item"));
    }
}
