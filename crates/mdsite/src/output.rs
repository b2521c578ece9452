//! Terminal messages printed around the server lifecycle.
//!
//! Everything goes to stderr so stdout stays free for the log layer.

use console::{Style, Term};
use mdsite_config::Config;

use crate::error::CliError;

/// Startup and failure reporting for the `mdsite` binary.
pub(crate) struct Output {
    term: Term,
    address: Style,
    warning: Style,
    failure: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            address: Style::new().cyan().bold(),
            warning: Style::new().yellow(),
            failure: Style::new().red(),
        }
    }

    /// Print where the site is served and which directories it uses.
    pub(crate) fn startup(&self, config: &Config, port: u16) {
        let mut lines = startup_lines(config, port).into_iter();
        if let Some(address) = lines.next() {
            self.line(&self.address.apply_to(address).to_string());
        }
        for line in lines {
            self.line(&line);
        }
    }

    /// Report that the configured port was replaced by `port`.
    pub(crate) fn port_fallback(&self, requested: i64, port: u16) {
        let message = format!("Port {requested} is out of range, using {port}");
        self.line(&self.warning.apply_to(message).to_string());
    }

    /// Report the error that ends the process.
    pub(crate) fn failure(&self, err: &CliError) {
        self.line(&self.failure.apply_to(format!("Error: {err}")).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

/// Startup banner: the address first, then one line per directory.
fn startup_lines(config: &Config, port: u16) -> Vec<String> {
    let docs = &config.docs_resolved;
    let mut lines = vec![
        format!("Serving \"{}\" at http://{}:{port}", config.site.title, config.server.host),
        format!("Source directory: {}", docs.source_dir.display()),
        format!("Cache directory: {}", docs.articles_dir().display()),
        format!("Log directory: {}", docs.logs_dir().display()),
    ];
    if let Some(index) = &config.site.index {
        lines.push(format!("Default document: {index}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mdsite_config::DocsConfig;

    use super::*;
    use pretty_assertions::assert_eq;

    fn config(index: Option<&str>) -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_owned();
        config.site.title = "Handbook".to_owned();
        config.site.index = index.map(str::to_owned);
        config.docs_resolved = DocsConfig {
            source_dir: PathBuf::from("/srv/docs"),
            work_dir: PathBuf::from("/srv"),
        };
        config
    }

    #[test]
    fn test_startup_lines() {
        let lines = startup_lines(&config(None), 8080);

        assert_eq!(
            lines,
            vec![
                "Serving \"Handbook\" at http://127.0.0.1:8080".to_owned(),
                "Source directory: /srv/docs".to_owned(),
                format!("Cache directory: {}", PathBuf::from("/srv").join("cache/articles").display()),
                format!("Log directory: {}", PathBuf::from("/srv").join("cache/logs").display()),
            ]
        );
    }

    #[test]
    fn test_startup_lines_name_default_document() {
        let lines = startup_lines(&config(Some("guide/intro")), 5006);

        assert_eq!(lines.last().map(String::as_str), Some("Default document: guide/intro"));
    }
}
