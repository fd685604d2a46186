//! `devlog build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use devlog_config::{CliSettings, Config, FencePolicySetting};
use devlog_page::{PageShell, build_page};
use devlog_renderer::EntryRenderer;

use super::posts::{fence_policy, read_post};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Post files to render (e.g. `posts/*.md`).
    #[arg(required = true)]
    posts: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover devlog.toml).
    #[arg(short, long, env = "DEVLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Page template to inject posts into (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Template text after which posts are injected (overrides config).
    #[arg(short, long)]
    marker: Option<String>,

    /// Output file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Close unbalanced code fences at the end of a post instead of failing.
    #[arg(long)]
    auto_close_fences: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a post cannot be read or
    /// rendered, or the page cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template: self.template,
            marker: self.marker,
            output: self.output,
            fence_policy: self
                .auto_close_fences
                .then_some(FencePolicySetting::AutoClose),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let page_config = &config.page_resolved;

        let shell = match (&page_config.template, &page_config.marker) {
            (Some(template), Some(marker)) => {
                output.info(&format!("Template: {}", template.display()));
                let content =
                    std::fs::read_to_string(template).map_err(|source| CliError::Read {
                        path: template.clone(),
                        source,
                    })?;
                PageShell::from_template(content, marker.clone())
            }
            _ => PageShell::builtin(&page_config.title),
        };

        let posts = self
            .posts
            .iter()
            .map(|path| read_post(path))
            .collect::<Result<Vec<_>, _>>()?;
        output.info(&format!("Rendering {} posts", posts.len()));

        let renderer =
            EntryRenderer::new().with_fence_policy(fence_policy(config.render.fence_policy));
        let page = build_page(posts, &renderer, &shell)?;

        for warning in &page.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        write_page(&page_config.output, &page.html)?;

        output.success(&format!(
            "Wrote {} posts to {}",
            page.post_count,
            page_config.output.display()
        ));
        Ok(())
    }
}

/// Write the page, creating the parent directory if needed.
fn write_page(path: &Path, html: &str) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, html).map_err(write_error)
}
