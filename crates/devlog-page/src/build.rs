//! Render a post set and assemble the page.

use devlog_renderer::{EntryRenderer, Fragment, Post, RenderBackend, sort_newest_first};
use rayon::prelude::*;

use crate::error::PageError;
use crate::shell::PageShell;

/// An assembled devlog page.
#[derive(Debug)]
pub struct Page {
    /// Complete page HTML.
    pub html: String,
    /// Number of posts on the page.
    pub post_count: usize,
    /// Render warnings, each prefixed with the post identifier.
    pub warnings: Vec<String>,
}

/// Render `posts` newest first and inject them into `shell`.
///
/// Posts are rendered in parallel; output order is the sorted post order.
/// Render warnings are returned on the [`Page`] for the caller to report.
///
/// # Errors
///
/// Returns [`PageError::NoPosts`] for an empty post set, a
/// [`PageError::Render`] if any post fails to render, and
/// [`PageError::MarkerNotFound`] if the shell lacks its marker.
pub fn build_page<B: RenderBackend>(
    mut posts: Vec<Post>,
    renderer: &EntryRenderer<B>,
    shell: &PageShell,
) -> Result<Page, PageError> {
    if posts.is_empty() {
        return Err(PageError::NoPosts);
    }

    sort_newest_first(&mut posts);
    tracing::debug!(post_count = posts.len(), "Rendering posts");

    let fragments = posts
        .par_iter()
        .map(|post| renderer.render_post(post))
        .collect::<Result<Vec<Fragment>, _>>()?;

    let warnings: Vec<String> = fragments
        .iter()
        .flat_map(|fragment| {
            fragment
                .warnings
                .iter()
                .map(move |warning| format!("{}: {warning}", fragment.identifier))
        })
        .collect();
    let html = shell.inject(&fragments)?;
    tracing::info!(
        post_count = fragments.len(),
        warnings = warnings.len(),
        bytes = html.len(),
        "Page assembled"
    );

    Ok(Page {
        html,
        post_count: fragments.len(),
        warnings,
    })
}
