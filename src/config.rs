use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// Default period token, e.g. "last-30-days"
    #[serde(default)]
    pub(crate) period: Option<String>,
    #[serde(default)]
    pub(crate) category_column: Option<String>,
    #[serde(default)]
    pub(crate) amount_column: Option<String>,
    #[serde(default)]
    pub(crate) date_column: Option<String>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
}

/// Result of the config search. Logging is not installed yet when this
/// runs, so what happened is kept and reported afterwards.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) source: Option<PathBuf>,
    pub(crate) problems: Vec<String>,
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for problem in &self.problems {
            tracing::warn!("{problem}");
        }
        if let Some(path) = &self.source {
            tracing::debug!(path = %path.display(), "loaded config");
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if !path.exists() {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    loaded
                        .problems
                        .push(format!("Failed to read {}: {}", path.display(), e));
                    continue;
                }
            };
            match Self::parse(&content) {
                Ok(config) => {
                    loaded.config = config;
                    loaded.source = Some(path);
                    return loaded;
                }
                Err(e) => {
                    loaded
                        .problems
                        .push(format!("Failed to parse {}: {}", path.display(), e));
                }
            }
        }

        loaded
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/txsummary/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("txsummary").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/txsummary/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("txsummary").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.txsummary.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".txsummary.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("txsummary")));
    }

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
period = "this-month"
category_column = "Category"
amount_column = "Amount"
date_column = "Date"
currency = "USD"
top = 5
timezone = "Asia/Riyadh"
locale = "de"
color = "never"
debug = true
"#,
        )
        .unwrap();
        assert_eq!(config.period.as_deref(), Some("this-month"));
        assert_eq!(config.category_column.as_deref(), Some("Category"));
        assert_eq!(config.amount_column.as_deref(), Some("Amount"));
        assert_eq!(config.date_column.as_deref(), Some("Date"));
        assert_eq!(config.currency.as_deref(), Some("USD"));
        assert_eq!(config.top, Some(5));
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert!(config.debug);
        assert!(!config.no_color);
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.period.is_none());
        assert!(config.color.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn parse_rejects_bad_color() {
        assert!(Config::parse(r#"color = "sometimes""#).is_err());
    }
}
