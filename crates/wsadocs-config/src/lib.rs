//! Configuration management for WSADOCS.
//!
//! Parses `wsadocs.toml` configuration files with serde and provides
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
//!
//! Expanded fields:
//! - `server.host`
//! - `source.url`
//!
//! ## Base Path
//!
//! `site.base_path` is the mount prefix of the viewer. It is normalized once
//! here (leading and trailing `/`) and the HTTP source root is derived from it,
//! so consumers never recompute it.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the document source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the document source URL.
    pub source_url: Option<String>,
    /// Override the base path.
    pub base_path: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wsadocs.toml";

/// Default source directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "public";

/// Default HTTP source timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site presentation configuration.
    pub site: SiteConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Document source as parsed from TOML.
    source: SourceConfigRaw,
    /// Markdown rendering configuration.
    pub render: RenderConfig,

    /// Resolved document source (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Brand shown in the navbar and page titles.
    pub title: String,
    /// Mount prefix of the viewer, e.g. `/WSADOCS/`.
    pub base_path: String,
    /// Heading shown by the fallback route.
    pub welcome: String,
    /// Markdown shown when a page cannot be fetched.
    pub not_found: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "WSADOCS".to_owned(),
            base_path: "/".to_owned(),
            welcome: "Welcome to WSADOCS!".to_owned(),
            not_found: "Page not found".to_owned(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Syntax highlighting theme name.
    pub theme: String,
    /// Replace `:shortcode:` emoji.
    pub emoji: bool,
    /// Render `$...$` and `$$...$$` math.
    pub math: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_owned(),
            emoji: true,
            math: true,
        }
    }
}

/// Raw source configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    dir: Option<String>,
    url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Where documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Local directory containing `docs/docsList.json`.
    Dir(PathBuf),
    /// HTTP root URL, base path already applied, always ending in `/`.
    Url(String),
}

/// Resolved document source configuration.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Document root.
    pub location: SourceLocation,
    /// Global timeout for HTTP reads.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: SourceLocation::Dir(PathBuf::from(DEFAULT_SOURCE_DIR)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
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
        /// Config field path (e.g., "`source.url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Normalize a base path to start and end with `/`.
///
/// `""`, `"/"` and `"//"` all become `"/"`; `"WSADOCS"` becomes `"/WSADOCS/"`.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

/// Join a source URL with a normalized base path.
fn join_url(url: &str, base_path: &str) -> String {
    format!("{}{base_path}", url.trim_end_matches('/'))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wsadocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied before resolution, so overridden values go
    /// through the same normalization and validation as file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let (mut config, config_dir) = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::parse_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::parse_file(&discovered)?
        } else {
            let cwd = std::env::current_dir().unwrap_or_default();
            (Self::default_with_base(&cwd), cwd)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.resolve(&config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.source.dir = Some(source_dir.to_string_lossy().into_owned());
            self.source.url = None;
        }
        if let Some(source_url) = &settings.source_url {
            self.source.url = Some(source_url.clone());
            self.source.dir = None;
        }
        if let Some(base_path) = &settings.base_path {
            self.site.base_path.clone_from(base_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            server: ServerConfig::default(),
            source: SourceConfigRaw::default(),
            render: RenderConfig::default(),
            source_resolved: SourceConfig {
                location: SourceLocation::Dir(base.join(DEFAULT_SOURCE_DIR)),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            config_path: None,
        }
    }

    /// Parse a config file and expand environment variables.
    ///
    /// Returns the config and the directory relative paths resolve against.
    fn parse_file(path: &Path) -> Result<(Self, PathBuf), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        let config_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok((config, config_dir))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_server()?;
        if let SourceLocation::Url(url) = &self.source_resolved.location {
            require_http_url(url, "source.url")?;
        }
        if self.source_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.render.theme, "render.theme")?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if self
            .site
            .base_path
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '?' | '#' | '\\'))
        {
            return Err(ConfigError::Validation(format!(
                "site.base_path contains invalid characters: {}",
                self.site.base_path
            )));
        }
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, which a config file never wants
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        if let Some(ref url) = self.source.url {
            self.source.url = Some(expand::expand_env(url, "source.url")?);
        }
        Ok(())
    }

    /// Normalize the base path and resolve the document source.
    ///
    /// Relative source directories resolve against `config_dir`. A source URL
    /// gets the base path appended.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.site.base_path = normalize_base_path(&self.site.base_path);

        let location = match (&self.source.dir, &self.source.url) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "[source] accepts either dir or url, not both".to_owned(),
                ));
            }
            (None, Some(url)) => {
                require_non_empty(url, "source.url")?;
                SourceLocation::Url(join_url(url, &self.site.base_path))
            }
            (dir, None) => {
                SourceLocation::Dir(config_dir.join(dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)))
            }
        };

        self.source_resolved = SourceConfig {
            location,
            timeout: Duration::from_secs(self.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };
        Ok(())
    }
}
