//! Line-oriented markdown renderer for devlog entries.
//!
//! This crate turns one devlog [`Post`] into a self-contained HTML
//! [`Fragment`]. The markdown dialect is small: a title line,
//! `##`/`###` sub-headers, triple-backtick fences, single-line video and
//! image embeds, and inline links and code inside plain paragraphs.
//!
//! # Architecture
//!
//! Rendering is split into three layers:
//! - [`classify`]: decides the syntactic category of one source line using an
//!   ordered rule table (first match wins)
//! - [`transform_inline`]: rewrites links and inline code within plain text
//! - [`EntryRenderer`]: walks a post's lines with an explicit fence state
//!   machine and emits markup through a [`RenderBackend`]
//!
//! [`HtmlBackend`] is the only backend and produces HTML5.
//!
//! # Example
//!
//! ```
//! use devlog_renderer::{EntryRenderer, Post};
//!
//! let post = Post::parse("2026-02-15", "# Title\n\nHello");
//! let fragment = EntryRenderer::new().render_post(&post).unwrap();
//! assert!(fragment.html.contains("<h2>Title</h2>"));
//! assert!(fragment.html.contains("<p>Hello</p>"));
//! ```

mod backend;
mod classify;
mod error;
mod html;
mod inline;
mod post;
mod renderer;

pub use backend::RenderBackend;
pub use classify::{Line, classify};
pub use error::RenderError;
pub use html::{HtmlBackend, escape_attr, escape_html};
pub use inline::transform_inline;
pub use post::{Post, sort_newest_first};
pub use renderer::{EntryRenderer, FencePolicy, Fragment};
