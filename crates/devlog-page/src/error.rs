//! Page assembly errors.

use devlog_renderer::RenderError;

/// Error returned while assembling a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// There is nothing to render.
    #[error("no posts to render")]
    NoPosts,
    /// The page template does not contain the injection marker.
    #[error("injection marker {0:?} not found in page template")]
    MarkerNotFound(String),
    /// A post failed to render.
    #[error(transparent)]
    Render(#[from] RenderError),
}
