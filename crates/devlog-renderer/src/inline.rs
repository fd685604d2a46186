//! Inline markdown substitutions for plain-text lines.

use std::sync::LazyLock;

use regex::Regex;

/// `[label](url)`; label excludes `]`, url excludes `)`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// `` `code` ``; code excludes backticks.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Rewrite links and inline code spans within one line of plain text.
///
/// Links are substituted first, inline code second. No HTML escaping is
/// applied: plain text is emitted as written.
///
/// # Examples
///
/// ```
/// use devlog_renderer::transform_inline;
///
/// assert_eq!(
///     transform_inline("See [docs](http://a) for `code`."),
///     r#"See <a href="http://a">docs</a> for <code>code</code>."#
/// );
/// ```
pub fn transform_inline(text: &str) -> String {
    let linked = LINK_RE.replace_all(text, r#"<a href="${2}">${1}</a>"#);
    CODE_RE
        .replace_all(&linked, "<code>${1}</code>")
        .into_owned()
}
