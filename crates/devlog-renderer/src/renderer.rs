//! Entry renderer: one post in, one HTML fragment out.

use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::classify::{Line, classify};
use crate::error::RenderError;
use crate::html::HtmlBackend;
use crate::inline::transform_inline;
use crate::post::Post;

/// What to do with a post whose body ends inside a code fence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FencePolicy {
    /// Fail with [`RenderError::UnclosedFence`].
    #[default]
    Reject,
    /// Close the code block at the end of the post and record a warning.
    AutoClose,
}

/// Rendered markup for one post.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fragment {
    /// Identifier of the rendered post.
    pub identifier: String,
    /// Self-contained HTML for the post.
    pub html: String,
    /// Warnings generated during rendering (e.g. an auto-closed fence).
    pub warnings: Vec<String>,
}

/// Fence state while walking one post body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FenceState {
    Outside,
    /// Inside a fence opened on the given 1-based raw content line.
    Inside { opened_at: usize },
}

impl FenceState {
    fn is_inside(self) -> bool {
        matches!(self, Self::Inside { .. })
    }
}

/// Renders posts through a [`RenderBackend`].
///
/// The renderer holds no per-post state, so a single instance can render
/// any number of posts, including from several threads at once.
pub struct EntryRenderer<B: RenderBackend = HtmlBackend> {
    fence_policy: FencePolicy,
    _backend: PhantomData<fn() -> B>,
}

impl EntryRenderer<HtmlBackend> {
    /// Create an HTML renderer that rejects unclosed fences.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend()
    }
}

impl Default for EntryRenderer<HtmlBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> EntryRenderer<B> {
    /// Create a renderer for an arbitrary backend.
    #[must_use]
    pub fn with_backend() -> Self {
        Self {
            fence_policy: FencePolicy::default(),
            _backend: PhantomData,
        }
    }

    /// Set the policy for posts that end inside a code fence.
    #[must_use]
    pub fn with_fence_policy(mut self, policy: FencePolicy) -> Self {
        self.fence_policy = policy;
        self
    }

    pub fn fence_policy(&self) -> FencePolicy {
        self.fence_policy
    }

    /// Render one post into a self-contained fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnclosedFence`] when the body ends inside a
    /// fence and the policy is [`FencePolicy::Reject`].
    pub fn render_post(&self, post: &Post) -> Result<Fragment, RenderError> {
        let mut html = String::with_capacity(1024);
        let mut warnings = Vec::new();
        let mut fence = FenceState::Outside;

        B::entry_start(post.identifier(), &mut html);
        if let Some(title) = post.title() {
            B::title(title, &mut html);
        }
        B::date(post.date(), &post.display_date(), &mut html);

        for (index, raw) in post.body().iter().enumerate() {
            match classify(raw, fence.is_inside()) {
                Line::Blank => {}
                Line::FenceDelimiter { .. } => {
                    fence = match fence {
                        FenceState::Outside => {
                            B::code_block_start(&mut html);
                            FenceState::Inside {
                                opened_at: post.body_offset() + index + 1,
                            }
                        }
                        FenceState::Inside { .. } => {
                            B::code_block_end(&mut html);
                            FenceState::Outside
                        }
                    };
                }
                Line::FenceContent(text) => B::code_line(text, &mut html),
                Line::SubHeader { level, text } => B::sub_header(level, text, &mut html),
                Line::Video { url, dimensions } => B::video(url, dimensions, &mut html),
                Line::Image { url, alt } => B::image(url, alt, &mut html),
                Line::PlainText(text) => B::paragraph(&transform_inline(text), &mut html),
            }
        }

        if let FenceState::Inside { opened_at } = fence {
            match self.fence_policy {
                FencePolicy::Reject => {
                    return Err(RenderError::UnclosedFence {
                        identifier: post.identifier().to_owned(),
                        line: opened_at,
                    });
                }
                FencePolicy::AutoClose => {
                    B::code_block_end(&mut html);
                    warnings.push(format!(
                        "code fence opened on line {opened_at} was closed at end of post"
                    ));
                }
            }
        }

        B::entry_end(&mut html);

        Ok(Fragment {
            identifier: post.identifier().to_owned(),
            html,
            warnings,
        })
    }
}
