//! Configuration management for devlog.
//!
//! Parses `devlog.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` expands to the home directory
//!
//! Expanded fields:
//! - `page.title`
//! - `page.template`
//! - `page.marker`
//! - `page.output`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override injection marker.
    pub marker: Option<String>,
    /// Override output path.
    pub output: Option<PathBuf>,
    /// Override unclosed fence policy.
    pub fence_policy: Option<FencePolicySetting>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "devlog.toml";

/// Default page title for the built-in shell.
const DEFAULT_TITLE: &str = "Devlog";

/// Default output filename, relative to the config directory.
const DEFAULT_OUTPUT: &str = "index.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page configuration (paths are relative strings from TOML).
    page: PageConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved page configuration (set after loading).
    #[serde(skip)]
    pub page_resolved: PageConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw page configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PageConfigRaw {
    title: Option<String>,
    template: Option<String>,
    marker: Option<String>,
    output: Option<String>,
}

/// Resolved page configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PageConfig {
    /// Title of the built-in page shell.
    pub title: String,
    /// Page template; the built-in shell is used when unset.
    pub template: Option<PathBuf>,
    /// Text in the template after which posts are injected.
    pub marker: Option<String>,
    /// Path the assembled page is written to.
    pub output: PathBuf,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// What to do with a post that ends inside a code fence.
    pub fence_policy: FencePolicySetting,
}

/// Unclosed code fence policy as written in `devlog.toml`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FencePolicySetting {
    /// Fail the build.
    #[default]
    Reject,
    /// Close the fence at the end of the post and warn.
    AutoClose,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`page.output`").
        field: String,
        /// Error message (e.g., "${`DEVLOG_OUT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `devlog.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.page_resolved.template = Some(template.clone());
        }
        if let Some(marker) = &settings.marker {
            self.page_resolved.marker = Some(marker.clone());
        }
        if let Some(output) = &settings.output {
            self.page_resolved.output.clone_from(output);
        }
        if let Some(fence_policy) = settings.fence_policy {
            self.render.fence_policy = fence_policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            page: PageConfigRaw::default(),
            render: RenderConfig::default(),
            page_resolved: PageConfig {
                title: DEFAULT_TITLE.to_owned(),
                template: None,
                marker: None,
                output: base.join(DEFAULT_OUTPUT),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page_resolved;
        require_non_empty(&page.title, "page.title")?;

        match (&page.template, &page.marker) {
            (_, Some(marker)) => require_non_empty(marker, "page.marker")?,
            (Some(_), None) => {
                return Err(ConfigError::Validation(
                    "page.template requires page.marker to be set".to_owned(),
                ));
            }
            (None, None) => {}
        }

        if page.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "page.output cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let page = &mut self.page;
        for (value, field) in [
            (&mut page.title, "page.title"),
            (&mut page.template, "page.template"),
            (&mut page.marker, "page.marker"),
            (&mut page.output, "page.output"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let page = &self.page;
        self.page_resolved = PageConfig {
            title: page
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            template: page.template.as_deref().map(|t| config_dir.join(t)),
            marker: page.marker.clone(),
            output: config_dir.join(page.output.as_deref().unwrap_or(DEFAULT_OUTPUT)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.page_resolved.title, "Devlog");
        assert_eq!(config.page_resolved.template, None);
        assert_eq!(config.page_resolved.marker, None);
        assert_eq!(
            config.page_resolved.output,
            PathBuf::from("/test/index.html")
        );
        assert_eq!(config.render.fence_policy, FencePolicySetting::Reject);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.fence_policy, FencePolicySetting::Reject);
        assert!(config.page.template.is_none());
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
fence_policy = "auto-close"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.fence_policy, FencePolicySetting::AutoClose);
    }

    #[test]
    fn test_parse_unknown_fence_policy() {
        let toml = r#"
[render]
fence_policy = "ignore"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[page]
title = "Dungeon Devlog"
template = "devlog/template.html"
marker = "<div id=\"posts\">"
output = "devlog/index.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.page_resolved.title, "Dungeon Devlog");
        assert_eq!(
            config.page_resolved.template,
            Some(PathBuf::from("/project/devlog/template.html"))
        );
        assert_eq!(
            config.page_resolved.marker.as_deref(),
            Some(r#"<div id="posts">"#)
        );
        assert_eq!(
            config.page_resolved.output,
            PathBuf::from("/project/devlog/index.html")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.page_resolved.title, "Devlog");
        assert_eq!(
            config.page_resolved.output,
            PathBuf::from("/project/index.html")
        );
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devlog.toml");
        std::fs::write(
            &path,
            r#"
[page]
output = "site/index.html"

[render]
fence_policy = "auto-close"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.page_resolved.output, dir.path().join("site/index.html"));
        assert_eq!(config.render.fence_policy, FencePolicySetting::AutoClose);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_title_with_literal_dollar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devlog.toml");
        std::fs::write(
            &path,
            r#"
[page]
title = "Earned $100 on launch"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.page_resolved.title, "Earned $100 on launch");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devlog.toml");
        std::fs::write(&path, "[page\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_template_without_marker_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devlog.toml");
        std::fs::write(&path, "[page]\ntemplate = \"template.html\"\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("page.marker"));
    }

    #[test]
    fn test_load_cli_marker_completes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devlog.toml");
        std::fs::write(&path, "[page]\ntemplate = \"template.html\"\n").unwrap();
        let settings = CliSettings {
            marker: Some("<!-- posts -->".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(
            config.page_resolved.template,
            Some(dir.path().join("template.html"))
        );
        assert_eq!(config.page_resolved.marker.as_deref(), Some("<!-- posts -->"));
    }

    #[test]
    fn test_apply_cli_settings_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output: Some(PathBuf::from("/tmp/out.html")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.page_resolved.output, PathBuf::from("/tmp/out.html"));
        assert_eq!(config.page_resolved.title, "Devlog"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_fence_policy() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            fence_policy: Some(FencePolicySetting::AutoClose),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.fence_policy, FencePolicySetting::AutoClose);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.page_resolved.output, config_before.page_resolved.output);
        assert_eq!(config.page_resolved.template, config_before.page_resolved.template);
        assert_eq!(config.render.fence_policy, config_before.render.fence_policy);
    }

    #[test]
    fn test_expand_env_vars_output() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DEVLOG_TEST_OUT_DIR", "public");
        }

        let toml = r#"
[page]
output = "${DEVLOG_TEST_OUT_DIR}/index.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.page.output.as_deref(), Some("public/index.html"));

        unsafe {
            std::env::remove_var("DEVLOG_TEST_OUT_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_DEVLOG_CONFIG_TEST");
        }

        let toml = r#"
[page]
template = "${MISSING_VAR_DEVLOG_CONFIG_TEST}/template.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_DEVLOG_CONFIG_TEST"));
        assert!(err.to_string().contains("page.template"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.page_resolved.title = String::new();
        assert_validation_error(&config, &["page.title", "empty"]);
    }

    #[test]
    fn test_validate_marker_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.page_resolved.template = Some(PathBuf::from("/test/template.html"));
        config.page_resolved.marker = Some(String::new());
        assert_validation_error(&config, &["page.marker", "empty"]);
    }

    #[test]
    fn test_validate_output_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.page_resolved.output = PathBuf::new();
        assert_validation_error(&config, &["page.output"]);
    }
}
