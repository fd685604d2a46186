//! Reading post files named on the command line.

use std::path::Path;

use devlog_config::FencePolicySetting;
use devlog_renderer::{FencePolicy, Post};

use crate::error::CliError;

/// Read one post file; its identifier is the file stem.
pub(crate) fn read_post(path: &Path) -> Result<Post, CliError> {
    let identifier = Post::identifier_from_path(path).ok_or_else(|| {
        CliError::Validation(format!("Not a post file: {}", path.display()))
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), %identifier, "Read post");
    Ok(Post::parse(identifier, &content))
}

/// Map the configured fence policy onto the renderer's.
pub(crate) fn fence_policy(setting: FencePolicySetting) -> FencePolicy {
    match setting {
        FencePolicySetting::Reject => FencePolicy::Reject,
        FencePolicySetting::AutoClose => FencePolicy::AutoClose,
    }
}
