//! Render backend trait for output-specific markup.
//!
//! The entry renderer owns line traversal and fence state; the backend only
//! decides what markup each classified line becomes.

use chrono::NaiveDate;

/// Backend trait for markup emission.
///
/// All methods append to `out`. Text arguments arrive exactly as they should
/// appear: fence content is raw (the backend escapes it), paragraph text has
/// already been through the inline transformer.
pub trait RenderBackend {
    /// Open the per-post container.
    fn entry_start(identifier: &str, out: &mut String);

    /// Close the per-post container.
    fn entry_end(out: &mut String);

    /// Render the post title, verbatim.
    fn title(text: &str, out: &mut String);

    /// Render the post date.
    ///
    /// # Arguments
    ///
    /// * `date` - Parsed date, `None` when the identifier has no valid date
    /// * `display` - Formatted date, or the raw identifier on fallback
    /// * `out` - Output buffer to write to
    fn date(date: Option<NaiveDate>, display: &str, out: &mut String);

    /// Render a level 3 or 4 sub-header, verbatim.
    fn sub_header(level: u8, text: &str, out: &mut String);

    /// Open a code block.
    fn code_block_start(out: &mut String);

    /// Render one source line inside an open code block.
    fn code_line(line: &str, out: &mut String);

    /// Close a code block.
    fn code_block_end(out: &mut String);

    /// Render a video embed with an optional `(width, height)` hint.
    fn video(url: &str, dimensions: Option<(u32, u32)>, out: &mut String);

    /// Render an image embed.
    fn image(url: &str, alt: &str, out: &mut String);

    /// Render a paragraph of already transformed inline content.
    fn paragraph(html: &str, out: &mut String);
}
