//! Page shell that fragments are injected into.

use std::fmt::Write;

use devlog_renderer::{Fragment, escape_html};

use crate::error::PageError;

/// Injection marker of the built-in shell.
pub const BUILTIN_MARKER: &str = r#"<main id="devlog">"#;

/// A static HTML page with a marker after which posts are inserted.
#[derive(Clone, Debug)]
pub struct PageShell {
    template: String,
    marker: String,
}

impl PageShell {
    /// Use a caller-supplied template.
    pub fn from_template(template: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            marker: marker.into(),
        }
    }

    /// Minimal HTML5 page titled `title`, injecting after [`BUILTIN_MARKER`].
    pub fn builtin(title: &str) -> Self {
        let title = escape_html(title);
        let mut html = String::with_capacity(1024);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(html, "<title>{title}</title>");
        html.push_str("<style>\n");
        html.push_str("body {\n");
        html.push_str("  max-width: 48rem;\n");
        html.push_str("  margin: 0 auto;\n");
        html.push_str("  padding: 1rem;\n");
        html.push_str("  font-family: system-ui, sans-serif;\n");
        html.push_str("}\n");
        html.push_str("article.post { margin-bottom: 3rem; }\n");
        html.push_str("article.post time { color: rgb(107 114 128); }\n");
        html.push_str("video, img { max-width: 100%; }\n");
        html.push_str("pre { overflow-x: auto; }\n");
        html.push_str("</style>\n");
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(html, "<h1>{title}</h1>");
        html.push_str(BUILTIN_MARKER);
        html.push_str("</main>\n</body>\n</html>\n");

        Self::from_template(html, BUILTIN_MARKER)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Insert fragments, in order, right after the first marker occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MarkerNotFound`] if the template lacks the marker.
    pub fn inject(&self, fragments: &[Fragment]) -> Result<String, PageError> {
        let at = self
            .template
            .find(&self.marker)
            .ok_or_else(|| PageError::MarkerNotFound(self.marker.clone()))?
            + self.marker.len();

        let fragments_len: usize = fragments.iter().map(|f| f.html.len()).sum();
        let mut html = String::with_capacity(self.template.len() + fragments_len + 1);
        html.push_str(&self.template[..at]);
        html.push('\n');
        for fragment in fragments {
            html.push_str(&fragment.html);
        }
        html.push_str(&self.template[at..]);
        Ok(html)
    }
}
