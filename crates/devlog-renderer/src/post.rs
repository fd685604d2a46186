//! Devlog post model and ordering.

use std::cmp::Ordering;
use std::path::Path;

use chrono::NaiveDate;

/// Format of the date prefix of a post identifier.
const IDENTIFIER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for post dates (e.g. "February 5, 2026").
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Length of the `YYYY-MM-DD` prefix.
const DATE_PREFIX_LEN: usize = 10;

/// One devlog entry.
///
/// The identifier comes from the source filename (`YYYY-MM-DD`, optionally
/// suffixed `-N` for several posts on the same day). The title is the first
/// content line when it starts with `# `; the body is everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    identifier: String,
    date: Option<NaiveDate>,
    title: Option<String>,
    body: Vec<String>,
}

impl Post {
    /// Parse a post from its identifier and raw markdown content.
    ///
    /// Lines are split on `\n` or `\r\n`.
    pub fn parse(identifier: impl Into<String>, content: &str) -> Self {
        Self::from_lines(identifier, content.lines())
    }

    /// Build a post from its identifier and raw content lines.
    pub fn from_lines<I, S>(identifier: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifier = identifier.into();
        let date = parse_identifier_date(&identifier);

        let mut lines = lines.into_iter().map(Into::into);
        let mut title = None;
        let mut body = Vec::new();
        if let Some(first) = lines.next() {
            match first.strip_prefix("# ") {
                Some(text) => title = Some(text.to_owned()),
                None => body.push(first),
            }
        }
        body.extend(lines);

        Self {
            identifier,
            date,
            title,
            body,
        }
    }

    /// Derive a post identifier from a source file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use devlog_renderer::Post;
    ///
    /// assert_eq!(
    ///     Post::identifier_from_path(Path::new("posts/2026-02-15-2.md")),
    ///     Some("2026-02-15-2".to_owned())
    /// );
    /// ```
    pub fn identifier_from_path(path: &Path) -> Option<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Calendar date from the leading `YYYY-MM-DD` of the identifier.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Body lines, excluding a consumed title line.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Number of raw content lines preceding the body.
    pub(crate) fn body_offset(&self) -> usize {
        usize::from(self.title.is_some())
    }

    /// Human-readable date, or the raw identifier when the date is invalid.
    pub fn display_date(&self) -> String {
        self.date.map_or_else(
            || self.identifier.clone(),
            |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
        )
    }
}

fn parse_identifier_date(identifier: &str) -> Option<NaiveDate> {
    let prefix = identifier.get(..DATE_PREFIX_LEN)?;
    NaiveDate::parse_from_str(prefix, IDENTIFIER_DATE_FORMAT).ok()
}

/// Compare two posts for newest-first display.
///
/// Dated posts come before undated ones. Same-day posts are ordered by
/// reverse lexicographic identifier, so `-2` precedes both `-10` and an
/// unsuffixed post.
fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (a.date, b.date) {
        (Some(date_a), Some(date_b)) => date_b
            .cmp(&date_a)
            .then_with(|| b.identifier.cmp(&a.identifier)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.identifier.cmp(&a.identifier),
    }
}

/// Sort posts newest first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(newest_first);
}
