//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
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
//! - `site.title`
//!
//! ## Paths
//!
//! `docs.source_dir` is relative to the config file. Rendered articles, logs
//! and static assets live under the working directory:
//!
//! ```text
//! {cwd}/cache/articles/   rendered documents
//! {cwd}/cache/logs/       access-YYYYMMDD.log
//! {cwd}/web/assets/       served under /static
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// Port used when none is configured or the configured one is out of range.
pub const DEFAULT_PORT: u16 = 5006;

/// Environment name that switches logging to production mode.
pub const PRODUCTION_ENV: &str = "prod";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port. Out-of-range values fall back to [`DEFAULT_PORT`].
    pub port: Option<i64>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site title.
    pub title: Option<String>,
    /// Override default document key.
    pub index: Option<String>,
    /// Override environment name.
    pub env: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsConfigRaw,
    /// Site presentation and behavior.
    pub site: SiteSettings,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Requested server port, possibly out of range. See [`Self::effective_port`].
    pub port: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: i64::from(DEFAULT_PORT),
        }
    }
}

impl ServerConfig {
    /// Port to bind: the requested port if it lies in `1..65535`,
    /// [`DEFAULT_PORT`] otherwise.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        effective_port(self.port)
    }
}

/// Map a requested port to a bindable one.
#[must_use]
pub fn effective_port(requested: i64) -> u16 {
    u16::try_from(requested)
        .ok()
        .filter(|port| *port > 0 && *port < u16::MAX)
        .unwrap_or(DEFAULT_PORT)
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Working directory the cache and assets live under.
    pub work_dir: PathBuf,
}

impl DocsConfig {
    /// Rendered article directory (`cache/articles/`).
    #[must_use]
    pub fn articles_dir(&self) -> PathBuf {
        self.work_dir.join("cache").join("articles")
    }

    /// Log directory (`cache/logs/`).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.work_dir.join("cache").join("logs")
    }

    /// Static asset directory (`web/assets/`).
    #[must_use]
    pub fn assets_dir(&self) -> PathBuf {
        self.work_dir.join("web").join("assets")
    }
}

/// Site settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Title shown in the page header and `<title>`.
    pub title: String,
    /// Document key served for `/`. Detected from the content tree if unset.
    pub index: Option<String>,
    /// Environment name; [`PRODUCTION_ENV`] enables production logging.
    pub env: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Docs".to_owned(),
            index: None,
            env: "dev".to_owned(),
        }
    }
}

impl SiteSettings {
    /// True if running in the production environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env == PRODUCTION_ENV
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
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
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
    /// Otherwise, searches for `mdsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;

        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, &cwd)?
        } else if let Some(discovered) = Self::discover_config(&cwd) {
            Self::load_from_file(&discovered, &cwd)?
        } else {
            Self::default_with_base(&cwd)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

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
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(index) = &settings.index {
            self.site.index = Some(index.clone());
        }
        if let Some(env) = &settings.env {
            self.site.env.clone_from(env);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
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
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            site: SiteSettings::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                work_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path, work_dir: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir, work_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        self.validate_index()?;
        Ok(())
    }

    /// The default document key is joined to the content directory, so it
    /// must stay relative and inside it.
    fn validate_index(&self) -> Result<(), ConfigError> {
        let Some(index) = &self.site.index else {
            return Ok(());
        };
        if index.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.index must not start with '/'".to_owned(),
            ));
        }
        if index.split('/').any(|segment| segment == "..") {
            return Err(ConfigError::Validation(
                "site.index must not contain '..'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        Ok(())
    }

    /// Resolve the source directory against the config directory and anchor
    /// the cache and assets at `work_dir`.
    fn resolve_paths(&mut self, config_dir: &Path, work_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            work_dir: work_dir.to_path_buf(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.effective_port(), 5006);
        assert_eq!(config.site.title, "Docs");
        assert!(config.site.index.is_none());
        assert!(!config.site.is_production());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.articles_dir(),
            PathBuf::from("/test/cache/articles")
        );
        assert_eq!(config.docs_resolved.logs_dir(), PathBuf::from("/test/cache/logs"));
        assert_eq!(config.docs_resolved.assets_dir(), PathBuf::from("/test/web/assets"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5006);
        assert_eq!(config.site.env, "dev");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[docs]
source_dir = "content"

[site]
title = "Handbook"
index = "guide/intro"
env = "prod"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"), Path::new("/srv"));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.effective_port(), 9000);
        assert_eq!(config.site.title, "Handbook");
        assert_eq!(config.site.index.as_deref(), Some("guide/intro"));
        assert!(config.site.is_production());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/content"));
        assert_eq!(
            config.docs_resolved.articles_dir(),
            PathBuf::from("/srv/cache/articles")
        );
    }

    #[test]
    fn test_effective_port_fallback() {
        assert_eq!(effective_port(8080), 8080);
        assert_eq!(effective_port(1), 1);
        assert_eq!(effective_port(65534), 65534);
        assert_eq!(effective_port(0), DEFAULT_PORT);
        assert_eq!(effective_port(-1), DEFAULT_PORT);
        assert_eq!(effective_port(65535), DEFAULT_PORT);
        assert_eq!(effective_port(70_000), DEFAULT_PORT);
    }

    #[test]
    fn test_negative_port_parses() {
        let config: Config = toml::from_str("[server]\nport = -5\n").unwrap();
        assert_eq!(config.server.effective_port(), DEFAULT_PORT);
    }

    #[test]
    fn test_apply_cli_settings_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.work_dir, PathBuf::from("/test")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_site() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            title: Some("Runbooks".to_owned()),
            index: Some("start".to_owned()),
            env: Some("prod".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.title, "Runbooks");
        assert_eq!(config.site.index.as_deref(), Some("start"));
        assert!(config.site.is_production());
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site.title, "Docs");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDSITE_TEST_HOST", "0.0.0.0");
        }

        let toml = r#"
[server]
host = "${MDSITE_TEST_HOST}"

[site]
title = "${MDSITE_TEST_TITLE_UNSET:-Team Docs}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site.title, "Team Docs");

        unsafe {
            std::env::remove_var("MDSITE_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let toml = r#"
[site]
title = "${MDSITE_MISSING_TITLE_VAR}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MDSITE_MISSING_TITLE_VAR"));
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_index() {
        let mut config = Config::default_with_base(Path::new("/test"));

        for bad in ["/abs", "../outside", "guide/../../x"] {
            config.site.index = Some(bad.to_owned());
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{bad}");
        }

        config.site.index = Some("guide/intro".to_owned());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        let path = project.join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs]\nsource_dir = \"pages\"\n\n[site]\ntitle = \"Notes\"\n").unwrap();

        let config = Config::load_from_file(&path, tmp.path()).unwrap();

        assert_eq!(config.docs_resolved.source_dir, project.join("pages"));
        assert_eq!(config.docs_resolved.articles_dir(), tmp.path().join("cache/articles"));
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_index() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nindex = \"../etc/passwd\"\n").unwrap();

        let result = Config::load_from_file(&path, tmp.path());

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_from_file_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = Config::load_from_file(&path, tmp.path());

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/mdsite.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(tmp.path().join(CONFIG_FILENAME)));
    }
}
