//! Devlog page assembly.
//!
//! Renders a set of posts newest first and injects the resulting fragments
//! into a page shell at a fixed marker.
//!
//! # Example
//!
//! ```
//! use devlog_page::{PageShell, build_page};
//! use devlog_renderer::{EntryRenderer, Post};
//!
//! let posts = vec![
//!     Post::parse("2026-02-14", "Older"),
//!     Post::parse("2026-02-15", "Newer"),
//! ];
//! let shell = PageShell::builtin("Devlog");
//! let page = build_page(posts, &EntryRenderer::new(), &shell).unwrap();
//! assert!(page.html.find("Newer").unwrap() < page.html.find("Older").unwrap());
//! ```

mod build;
mod error;
mod shell;

pub use build::{Page, build_page};
pub use error::PageError;
pub use shell::{BUILTIN_MARKER, PageShell};
