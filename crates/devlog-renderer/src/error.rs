//! Render error types.

/// Error returned when a post cannot be rendered.
///
/// Malformed embeds and unparseable dates are not errors; they degrade to
/// plain text and the raw identifier respectively.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    /// The post body ends inside a code fence.
    #[error("post {identifier}: code fence opened on line {line} is never closed")]
    UnclosedFence {
        /// Identifier of the offending post.
        identifier: String,
        /// 1-based line of the opening delimiter in the raw post content.
        line: usize,
    },
}
