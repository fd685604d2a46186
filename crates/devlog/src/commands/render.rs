//! `devlog render` command implementation.

use std::path::PathBuf;

use clap::Args;
use devlog_config::{CliSettings, Config, FencePolicySetting};
use devlog_renderer::EntryRenderer;

use super::posts::{fence_policy, read_post};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Post file to render.
    post: PathBuf,

    /// Print the fragment and its warnings as JSON.
    #[arg(long)]
    json: bool,

    /// Close an unbalanced code fence at the end of the post instead of failing.
    #[arg(long)]
    auto_close_fences: bool,

    /// Path to configuration file (default: auto-discover devlog.toml).
    #[arg(short, long, env = "DEVLOG_CONFIG")]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            fence_policy: self
                .auto_close_fences
                .then_some(FencePolicySetting::AutoClose),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let post = read_post(&self.post)?;
        let fragment = EntryRenderer::new()
            .with_fence_policy(fence_policy(config.render.fence_policy))
            .render_post(&post)?;

        if self.json {
            let mut json = serde_json::to_string_pretty(&fragment)?;
            json.push('\n');
            output.content(&json)?;
        } else {
            for warning in &fragment.warnings {
                output.warning(&format!("Warning: {warning}"));
            }
            output.content(&fragment.html)?;
        }
        Ok(())
    }
}
